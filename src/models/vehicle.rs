//! Modelo de Vehicle
//!
//! Vehículo identificado por su número de negocio, opcionalmente asignado a
//! un conductor a través de `driver_phone`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::text_enum;

/// Estado del vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    #[default]
    Active,
    Maintenance,
    Inactive,
}

text_enum!(VehicleStatus, "status", {
    Active => "active",
    Maintenance => "maintenance",
    Inactive => "inactive",
});

/// Vehicle - mapea a la tabla vehicles
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Vehicle {
    pub vehicle_number: String,
    pub holding_capacity: Option<i32>,
    pub mileage: i32,
    #[sqlx(try_from = "String")]
    pub status: VehicleStatus,
    pub driver_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cambios ya validados de una actualización parcial
#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    pub holding_capacity: Option<Option<i32>>,
    pub mileage: Option<i32>,
    pub status: Option<VehicleStatus>,
    pub driver_phone: Option<Option<String>>,
}

impl Vehicle {
    pub fn new(
        vehicle_number: String,
        holding_capacity: Option<i32>,
        mileage: i32,
        status: VehicleStatus,
        driver_phone: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            vehicle_number,
            holding_capacity,
            mileage,
            status,
            driver_phone,
            created_at: now,
            updated_at: now,
        }
    }

    /// Aplicar una actualización parcial
    pub fn apply(&mut self, changes: VehicleChanges) {
        if let Some(holding_capacity) = changes.holding_capacity {
            self.holding_capacity = holding_capacity;
        }
        if let Some(mileage) = changes.mileage {
            self.mileage = mileage;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(driver_phone) = changes.driver_phone {
            self.driver_phone = driver_phone;
        }
        self.updated_at = Utc::now();
    }
}
