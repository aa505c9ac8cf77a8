use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Role, User};

// Representación pública del usuario (sin password)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub phone: String,
    pub username: Option<String>,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.phone.clone(),
            phone: user.phone,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// Listado de usuarios para administración
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub master_phone: String,
}

// Request para cambiar el rol de un usuario
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub message: String,
    pub user: UserResponse,
}
