//! DTOs de la API
//!
//! Cuerpos de request y response por recurso. Toda entidad persistida
//! expone `id` como alias de su clave natural para clientes antiguos.

pub mod auth_dto;
pub mod driver_dto;
pub mod user_dto;
pub mod vehicle_dto;

use serde::Serialize;

/// Response con solo un mensaje (borrados)
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
