//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL.
//! Los enums se guardan como texto en minúsculas.

pub mod auth;
pub mod driver;
pub mod user;
pub mod vehicle;

pub use auth::{Claims, TokenType};
pub use driver::{Driver, DriverChanges, DriverStatus};
pub use user::{Role, User};
pub use vehicle::{Vehicle, VehicleChanges, VehicleStatus};

/// Valor de texto que no corresponde a ninguna variante de un enum del dominio
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid {kind} '{value}'. Must be one of: {allowed}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub allowed: &'static str,
}

impl From<UnknownVariant> for crate::utils::errors::AppError {
    fn from(e: UnknownVariant) -> Self {
        crate::utils::errors::AppError::BadRequest(e.to_string())
    }
}

/// Implementa `as_str`, `FromStr`, `TryFrom<String>` y `Display` para un enum
/// de variantes unitarias guardado como texto.
macro_rules! text_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::models::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($ty::$variant),)+
                    _ => Err($crate::models::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                        allowed: concat!($($text, ", "),+).trim_end_matches(", "),
                    }),
                }
            }
        }

        impl TryFrom<String> for $ty {
            type Error = $crate::models::UnknownVariant;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use text_enum;
