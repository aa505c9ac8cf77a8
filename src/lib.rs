//! Fleet management API
//!
//! Backend REST para la gestión de una flota: autenticación de usuarios,
//! registro de conductores y vehículos, y autorización por roles.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
