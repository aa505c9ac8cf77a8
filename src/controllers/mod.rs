//! Controladores
//!
//! Orquestan cada operación: autorización, validación, comprobación de
//! conflictos y acceso al repositorio.

pub mod driver_controller;
pub mod user_controller;
pub mod vehicle_controller;

pub use driver_controller::DriverController;
pub use user_controller::UserController;
pub use vehicle_controller::VehicleController;
