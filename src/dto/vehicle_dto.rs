use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Vehicle, VehicleStatus};
use crate::utils::serde_helpers::double_option;

// Request para crear un vehículo
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    pub vehicle_number: Option<String>,

    #[validate(range(min = 0))]
    pub holding_capacity: Option<i32>,

    #[validate(range(min = 0))]
    pub mileage: Option<i32>,

    pub status: Option<String>,
    pub driver_phone: Option<String>,
}

// Request para actualizar un vehículo; solo se tocan los campos presentes
#[derive(Debug, Default, Deserialize)]
pub struct UpdateVehicleRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub holding_capacity: Option<Option<i32>>,

    pub mileage: Option<i32>,

    pub status: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub driver_phone: Option<Option<String>>,
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: String,
    pub vehicle_number: String,
    pub holding_capacity: Option<i32>,
    pub mileage: i32,
    pub status: VehicleStatus,
    pub driver_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.vehicle_number.clone(),
            vehicle_number: vehicle.vehicle_number,
            holding_capacity: vehicle.holding_capacity,
            mileage: vehicle.mileage,
            status: vehicle.status,
            driver_phone: vehicle.driver_phone,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VehicleListResponse {
    pub vehicles: Vec<VehicleResponse>,
}

#[derive(Debug, Serialize)]
pub struct VehicleEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub vehicle: VehicleResponse,
}
