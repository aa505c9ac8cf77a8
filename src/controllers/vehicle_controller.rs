use std::sync::Arc;

use validator::Validate;

use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleEnvelope, VehicleListResponse,
    VehicleResponse,
};
use crate::dto::MessageResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::{Vehicle, VehicleChanges, VehicleStatus};
use crate::repositories::VehicleRepository;
use crate::services::authorization_service::{Action, AuthorizationPolicy};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{ensure_non_negative, present};

fn vehicle_not_found() -> AppError {
    AppError::NotFound("Vehicle not found".to_string())
}

pub struct VehicleController {
    repository: Arc<dyn VehicleRepository>,
    policy: Arc<AuthorizationPolicy>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.vehicles.clone(),
            policy: state.policy.clone(),
        }
    }

    pub async fn list(&self) -> AppResult<VehicleListResponse> {
        let vehicles = self.repository.list().await?;
        Ok(VehicleListResponse {
            vehicles: vehicles.into_iter().map(VehicleResponse::from).collect(),
        })
    }

    pub async fn get(&self, vehicle_number: &str) -> AppResult<VehicleEnvelope> {
        let vehicle = self
            .repository
            .find_by_number(vehicle_number)
            .await?
            .ok_or_else(vehicle_not_found)?;

        Ok(VehicleEnvelope {
            message: None,
            vehicle: vehicle.into(),
        })
    }

    /// `driver_phone` no se valida contra el registro de conductores
    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: AppResult<CreateVehicleRequest>,
    ) -> AppResult<VehicleEnvelope> {
        self.policy
            .ensure(actor.role, &actor.phone, Action::CreateVehicle, None)?;
        let request = request?;
        request.validate()?;

        let vehicle_number = present(request.vehicle_number)
            .ok_or_else(|| AppError::BadRequest("Missing required fields".to_string()))?;
        let status = present(request.status)
            .map(|value| value.parse::<VehicleStatus>())
            .transpose()?
            .unwrap_or_default();

        if self.repository.find_by_number(&vehicle_number).await?.is_some() {
            return Err(AppError::Conflict("Vehicle number already exists".to_string()));
        }

        let vehicle = Vehicle::new(
            vehicle_number,
            request.holding_capacity,
            request.mileage.unwrap_or(0),
            status,
            present(request.driver_phone),
        );
        let vehicle = self.repository.create(&vehicle).await?;
        tracing::info!("🚚 Vehículo creado: {} por {}", vehicle.vehicle_number, actor.phone);

        Ok(VehicleEnvelope {
            message: Some("Vehicle created successfully".to_string()),
            vehicle: vehicle.into(),
        })
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        vehicle_number: &str,
        request: AppResult<UpdateVehicleRequest>,
    ) -> AppResult<VehicleEnvelope> {
        self.policy
            .ensure(actor.role, &actor.phone, Action::UpdateVehicle, None)?;
        let request = request?;

        let mut vehicle = self
            .repository
            .find_by_number(vehicle_number)
            .await?
            .ok_or_else(vehicle_not_found)?;

        if let Some(Some(capacity)) = request.holding_capacity {
            ensure_non_negative("holding_capacity", capacity)?;
        }
        if let Some(mileage) = request.mileage {
            ensure_non_negative("mileage", mileage)?;
        }
        let status = request
            .status
            .map(|value| value.parse::<VehicleStatus>())
            .transpose()?;

        vehicle.apply(VehicleChanges {
            holding_capacity: request.holding_capacity,
            mileage: request.mileage,
            status,
            // Una cadena vacía desasigna, igual que null
            driver_phone: request.driver_phone.map(present),
        });

        let vehicle = self
            .repository
            .update(&vehicle)
            .await?
            .ok_or_else(vehicle_not_found)?;
        tracing::info!("✏️ Vehículo actualizado: {} por {}", vehicle.vehicle_number, actor.phone);

        Ok(VehicleEnvelope {
            message: Some("Vehicle updated successfully".to_string()),
            vehicle: vehicle.into(),
        })
    }

    pub async fn delete(
        &self,
        actor: &AuthenticatedUser,
        vehicle_number: &str,
    ) -> AppResult<MessageResponse> {
        self.policy
            .ensure(actor.role, &actor.phone, Action::DeleteVehicle, None)?;

        if !self.repository.delete(vehicle_number).await? {
            return Err(vehicle_not_found());
        }
        tracing::info!("🗑️ Vehículo eliminado: {} por {}", vehicle_number, actor.phone);

        Ok(MessageResponse::new("Vehicle deleted successfully"))
    }
}
