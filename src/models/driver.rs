//! Modelo de Driver
//!
//! Registro de negocio del conductor, con el teléfono como clave natural.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::text_enum;

/// Estado del conductor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverStatus {
    #[default]
    Available,
    Assigned,
    Inactive,
}

text_enum!(DriverStatus, "status", {
    Available => "available",
    Assigned => "assigned",
    Inactive => "inactive",
});

/// Driver - mapea a la tabla drivers
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Driver {
    pub phone: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub license_number: String,
    pub license_expiry: Option<NaiveDate>,
    #[sqlx(try_from = "String")]
    pub status: DriverStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cambios ya validados de una actualización parcial.
///
/// `None` deja el campo intacto; en los campos opcionales `Some(None)` lo borra.
#[derive(Debug, Clone, Default)]
pub struct DriverChanges {
    pub name: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub license_number: Option<String>,
    pub license_expiry: Option<Option<NaiveDate>>,
    pub status: Option<DriverStatus>,
}

impl Driver {
    pub fn new(
        phone: String,
        name: Option<String>,
        email: Option<String>,
        license_number: String,
        license_expiry: Option<NaiveDate>,
        status: DriverStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            phone,
            name,
            email,
            license_number,
            license_expiry,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Aplicar una actualización parcial
    pub fn apply(&mut self, changes: DriverChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(license_number) = changes.license_number {
            self.license_number = license_number;
        }
        if let Some(license_expiry) = changes.license_expiry {
            self.license_expiry = license_expiry;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}
