//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de usuarios autenticados.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::models::{Role, User};
use crate::services::auth_service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::bearer_token;

/// Usuario autenticado que se inyecta en las requests.
///
/// Se resuelve desde la base de datos en cada request: un cambio de rol
/// tiene efecto inmediato sin reemitir tokens.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub phone: String,
    pub role: Role,
    pub user: User,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            phone: user.phone.clone(),
            role: user.role,
            user,
        }
    }
}

/// Middleware de autenticación JWT: exige un access token válido cuyo
/// usuario siga existiendo (404 si fue borrado)
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Copia propia: la request no puede quedar prestada a través del await
    let token = bearer_token(request.headers())?.to_owned();

    let user = AuthService::from_state(&state).authenticate(&token).await?;
    tracing::debug!("🔓 Request autenticada: {} ({})", user.phone, user.role);

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(AuthenticatedUser::from(user));

    Ok(next.run(request).await)
}
