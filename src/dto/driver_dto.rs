use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Driver, DriverStatus};
use crate::utils::serde_helpers::double_option;

// Request para crear un conductor
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateDriverRequest {
    pub phone: Option<String>,
    pub license_number: Option<String>,

    #[validate(length(max = 100))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub license_expiry: Option<String>,
    pub status: Option<String>,
}

// Request para actualizar un conductor; solo se tocan los campos presentes
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDriverRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,

    pub license_number: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub license_expiry: Option<Option<String>>,

    pub status: Option<String>,
}

// Response de conductor
#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub id: String,
    pub phone: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub license_number: String,
    pub license_expiry: Option<NaiveDate>,
    pub status: DriverStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.phone.clone(),
            phone: driver.phone,
            name: driver.name,
            email: driver.email,
            license_number: driver.license_number,
            license_expiry: driver.license_expiry,
            status: driver.status,
            created_at: driver.created_at,
            updated_at: driver.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DriverListResponse {
    pub drivers: Vec<DriverResponse>,
}

#[derive(Debug, Serialize)]
pub struct DriverEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub driver: DriverResponse,
}
