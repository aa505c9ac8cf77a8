//! Helpers de deserialización para actualizaciones parciales

use serde::{Deserialize, Deserializer};

/// Distingue un campo ausente (`None`) de un `null` explícito (`Some(None)`).
///
/// Se usa junto con `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
