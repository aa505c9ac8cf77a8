use serde::{Deserialize, Serialize};

use crate::dto::user_dto::UserResponse;

// Request de registro: crea User + Driver con el mismo teléfono.
// Los campos son opcionales para poder responder 400 con un mensaje propio.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub license_number: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub license_expiry: Option<String>,
}

// Login request
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub phone: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

// Usuario actual, con el nombre a mostrar resuelto desde el Driver
#[derive(Debug, Serialize)]
pub struct CurrentUser {
    #[serde(flatten)]
    pub user: UserResponse,
    pub display_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user: CurrentUser,
}
