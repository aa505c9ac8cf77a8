//! Services module
//!
//! Lógica de negocio que no pertenece a un único recurso: autenticación,
//! emisión y verificación de tokens, y la política de autorización.

pub mod auth_service;
pub mod authorization_service;
pub mod jwt_service;

pub use auth_service::AuthService;
pub use authorization_service::{Action, AuthorizationPolicy, Decision, DenyReason};
pub use jwt_service::JwtService;
