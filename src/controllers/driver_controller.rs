use std::sync::Arc;

use validator::Validate;

use crate::dto::driver_dto::{
    CreateDriverRequest, DriverEnvelope, DriverListResponse, DriverResponse, UpdateDriverRequest,
};
use crate::dto::MessageResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::{Driver, DriverChanges, DriverStatus};
use crate::repositories::DriverRepository;
use crate::services::authorization_service::{Action, AuthorizationPolicy};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{
    ensure_email, ensure_phone, parse_license_expiry, present, require_all,
};

fn driver_not_found() -> AppError {
    AppError::NotFound("Driver not found".to_string())
}

pub struct DriverController {
    repository: Arc<dyn DriverRepository>,
    policy: Arc<AuthorizationPolicy>,
}

impl DriverController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.drivers.clone(),
            policy: state.policy.clone(),
        }
    }

    pub async fn list(&self) -> AppResult<DriverListResponse> {
        let drivers = self.repository.list().await?;
        Ok(DriverListResponse {
            drivers: drivers.into_iter().map(DriverResponse::from).collect(),
        })
    }

    pub async fn get(&self, phone: &str) -> AppResult<DriverEnvelope> {
        let driver = self
            .repository
            .find_by_phone(phone)
            .await?
            .ok_or_else(driver_not_found)?;

        Ok(DriverEnvelope {
            message: None,
            driver: driver.into(),
        })
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: AppResult<CreateDriverRequest>,
    ) -> AppResult<DriverEnvelope> {
        self.policy
            .ensure(actor.role, &actor.phone, Action::CreateDriver, None)?;
        let request = request?;
        request.validate()?;

        let [phone, license_number] = require_all(
            [request.phone, request.license_number],
            "Missing required fields",
        )?;
        // El teléfono es la clave que comparte con la cuenta de login
        ensure_phone(&phone)?;

        // A diferencia del registro, una fecha mal formada es un error
        let license_expiry = present(request.license_expiry)
            .map(|value| parse_license_expiry(&value))
            .transpose()?;
        let status = present(request.status)
            .map(|value| value.parse::<DriverStatus>())
            .transpose()?
            .unwrap_or_default();

        if self.repository.find_by_phone(&phone).await?.is_some() {
            return Err(AppError::Conflict("Driver phone already exists".to_string()));
        }
        if self
            .repository
            .find_by_license_number(&license_number)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("License number already exists".to_string()));
        }

        let driver = Driver::new(
            phone,
            present(request.name),
            present(request.email),
            license_number,
            license_expiry,
            status,
        );
        let driver = self.repository.create(&driver).await?;
        tracing::info!("✅ Conductor creado: {} por {}", driver.phone, actor.phone);

        Ok(DriverEnvelope {
            message: Some("Driver created successfully".to_string()),
            driver: driver.into(),
        })
    }

    /// Actualización parcial; el teléfono de la ruta es la clave y no cambia
    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        phone: &str,
        request: AppResult<UpdateDriverRequest>,
    ) -> AppResult<DriverEnvelope> {
        self.policy
            .ensure(actor.role, &actor.phone, Action::UpdateDriver, None)?;
        let request = request?;

        let mut driver = self
            .repository
            .find_by_phone(phone)
            .await?
            .ok_or_else(driver_not_found)?;

        let changes = self.validate_changes(&driver, request).await?;
        driver.apply(changes);

        let driver = self
            .repository
            .update(&driver)
            .await?
            .ok_or_else(driver_not_found)?;
        tracing::info!("✏️ Conductor actualizado: {} por {}", driver.phone, actor.phone);

        Ok(DriverEnvelope {
            message: Some("Driver updated successfully".to_string()),
            driver: driver.into(),
        })
    }

    async fn validate_changes(
        &self,
        current: &Driver,
        request: UpdateDriverRequest,
    ) -> AppResult<DriverChanges> {
        if let Some(Some(name)) = &request.name {
            if name.chars().count() > 100 {
                return Err(AppError::BadRequest(
                    "name must be at most 100 characters".to_string(),
                ));
            }
        }
        if let Some(Some(email)) = &request.email {
            ensure_email(email)?;
        }

        let license_number = match request.license_number {
            Some(value) => {
                let value = present(Some(value)).ok_or_else(|| {
                    AppError::BadRequest("License number cannot be empty".to_string())
                })?;
                if value != current.license_number {
                    if let Some(other) = self.repository.find_by_license_number(&value).await? {
                        if other.phone != current.phone {
                            return Err(AppError::Conflict(
                                "License number already exists".to_string(),
                            ));
                        }
                    }
                }
                Some(value)
            }
            None => None,
        };

        let license_expiry = match request.license_expiry {
            Some(Some(value)) => Some(Some(parse_license_expiry(&value)?)),
            Some(None) => Some(None),
            None => None,
        };

        let status = request
            .status
            .map(|value| value.parse::<DriverStatus>())
            .transpose()?;

        Ok(DriverChanges {
            name: request.name,
            email: request.email,
            license_number,
            license_expiry,
            status,
        })
    }

    /// Borra el conductor; sus vehículos quedan sin asignar
    pub async fn delete(&self, actor: &AuthenticatedUser, phone: &str) -> AppResult<MessageResponse> {
        self.policy
            .ensure(actor.role, &actor.phone, Action::DeleteDriver, None)?;

        if !self.repository.delete(phone).await? {
            return Err(driver_not_found());
        }
        tracing::info!("🗑️ Conductor eliminado: {} por {}", phone, actor.phone);

        Ok(MessageResponse::new("Driver deleted successfully"))
    }
}
