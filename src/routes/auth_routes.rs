use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    middleware::from_fn_with_state,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::dto::auth_dto::{
    CurrentUserResponse, LoginRequest, LoginResponse, RefreshResponse, RegisterRequest,
    RegisterResponse,
};
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::services::auth_service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::bearer_token;

/// Configura las rutas de autenticación
pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .merge(protected)
}

async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let Json(request) = payload?;
    let user = AuthService::from_state(&state).register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful".to_string(),
            user,
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(request) = payload?;
    let response = AuthService::from_state(&state).login(request).await?;
    Ok(Json(response))
}

/// El refresh token viaja como bearer en el header Authorization
async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, AppError> {
    let token = bearer_token(&headers)?;
    let response = AuthService::from_state(&state).refresh(token)?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
) -> Result<Json<CurrentUserResponse>, AppError> {
    let user = AuthService::from_state(&state).current_user(actor.user).await?;
    Ok(Json(CurrentUserResponse { user }))
}
