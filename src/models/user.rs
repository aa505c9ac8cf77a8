//! Modelo de User
//!
//! Identidad de acceso: teléfono (primary key), email único, hash de la
//! contraseña y rol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::text_enum;

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Driver,
    Admin,
    Manager,
}

text_enum!(Role, "role", {
    User => "user",
    Admin => "admin",
    Manager => "manager",
    Driver => "driver",
});

/// User - mapea a la tabla users. No implementa `Serialize`: la respuesta
/// pública es `UserResponse`, que nunca incluye el hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub phone: String,
    pub username: Option<String>,
    pub email: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Usuario creado por el registro; siempre con rol `driver`
    pub fn new_driver(
        phone: String,
        username: Option<String>,
        email: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            phone,
            username,
            email,
            password_hash,
            role: Role::Driver,
            created_at: now,
            updated_at: now,
        }
    }
}
