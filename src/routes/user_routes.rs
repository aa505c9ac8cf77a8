use axum::{
    extract::{rejection::JsonRejection, Path, State},
    middleware::from_fn_with_state,
    routing::{delete, get, put},
    Extension, Json, Router,
};

use crate::controllers::UserController;
use crate::dto::user_dto::{UpdateRoleRequest, UserEnvelope, UserListResponse};
use crate::dto::MessageResponse;
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::routes::json_body;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/", get(list_users))
        .route("/users/:phone/role", put(update_user_role))
        .route("/users/:phone", delete(delete_user))
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn list_users(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
) -> Result<Json<UserListResponse>, AppError> {
    let response = UserController::new(&state).list(&actor).await?;
    Ok(Json(response))
}

async fn update_user_role(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(phone): Path<String>,
    payload: Result<Json<UpdateRoleRequest>, JsonRejection>,
) -> Result<Json<UserEnvelope>, AppError> {
    let response = UserController::new(&state)
        .update_role(&actor, &phone, json_body(payload))
        .await?;
    Ok(Json(response))
}

async fn delete_user(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(phone): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let response = UserController::new(&state).delete(&actor, &phone).await?;
    Ok(Json(response))
}
