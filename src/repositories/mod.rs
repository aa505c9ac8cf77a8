//! Repositorios
//!
//! Un trait por almacén, con implementación PostgreSQL. Los servicios y
//! controladores dependen de los traits para poder probarse sin base de datos.

pub mod driver_repository;
pub mod user_repository;
pub mod vehicle_repository;

use async_trait::async_trait;

use crate::models::{Driver, Role, User, Vehicle};
use crate::utils::errors::AppResult;

pub use driver_repository::PgDriverRepository;
pub use user_repository::PgUserRepository;
pub use vehicle_repository::PgVehicleRepository;

/// Credenciales e identidad de los usuarios
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserta el usuario y su conductor en una sola transacción.
    /// Una clave duplicada (teléfono, email o licencia) es `Conflict` y no
    /// deja ninguna de las dos filas.
    async fn create_with_driver(&self, user: &User, driver: &Driver) -> AppResult<()>;

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn list(&self) -> AppResult<Vec<User>>;

    /// Devuelve el usuario actualizado, o `None` si no existe
    async fn update_role(&self, phone: &str, role: Role) -> AppResult<Option<User>>;

    /// `true` si se borró, `false` si no existía
    async fn delete(&self, phone: &str) -> AppResult<bool>;
}

/// Registros de conductores, por teléfono
#[async_trait]
pub trait DriverRepository: Send + Sync {
    async fn create(&self, driver: &Driver) -> AppResult<Driver>;

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<Driver>>;

    async fn find_by_license_number(&self, license_number: &str) -> AppResult<Option<Driver>>;

    async fn list(&self) -> AppResult<Vec<Driver>>;

    /// Guarda todos los campos del conductor (el merge parcial se hace antes)
    async fn update(&self, driver: &Driver) -> AppResult<Option<Driver>>;

    /// Borra el conductor y desasigna sus vehículos en la misma transacción.
    /// `true` si se borró, `false` si no existía.
    async fn delete(&self, phone: &str) -> AppResult<bool>;
}

/// Registros de vehículos, por número de vehículo
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: &Vehicle) -> AppResult<Vehicle>;

    async fn find_by_number(&self, vehicle_number: &str) -> AppResult<Option<Vehicle>>;

    async fn list(&self) -> AppResult<Vec<Vehicle>>;

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>>;

    async fn delete(&self, vehicle_number: &str) -> AppResult<bool>;
}
