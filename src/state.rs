//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    DriverRepository, PgDriverRepository, PgUserRepository, PgVehicleRepository,
    UserRepository, VehicleRepository,
};
use crate::services::authorization_service::AuthorizationPolicy;
use crate::services::jwt_service::JwtService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub jwt: Arc<JwtService>,
    pub policy: Arc<AuthorizationPolicy>,
    pub users: Arc<dyn UserRepository>,
    pub drivers: Arc<dyn DriverRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
}

impl AppState {
    /// Estado de producción sobre PostgreSQL
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self::with_repositories(
            config,
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgDriverRepository::new(pool.clone())),
            Arc::new(PgVehicleRepository::new(pool)),
        )
    }

    /// Estado con repositorios arbitrarios (p. ej. en memoria para tests)
    pub fn with_repositories(
        config: EnvironmentConfig,
        users: Arc<dyn UserRepository>,
        drivers: Arc<dyn DriverRepository>,
        vehicles: Arc<dyn VehicleRepository>,
    ) -> Self {
        Self {
            jwt: Arc::new(JwtService::from_config(&config)),
            policy: Arc::new(AuthorizationPolicy::new(config.master_phone.clone())),
            config: Arc::new(config),
            users,
            drivers,
            vehicles,
        }
    }
}
