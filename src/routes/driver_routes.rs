use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::DriverController;
use crate::dto::driver_dto::{
    CreateDriverRequest, DriverEnvelope, DriverListResponse, UpdateDriverRequest,
};
use crate::dto::MessageResponse;
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::routes::json_body;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/drivers", get(list_drivers).post(create_driver))
        .route("/drivers/", get(list_drivers).post(create_driver))
        .route(
            "/drivers/:phone",
            get(get_driver).put(update_driver).delete(delete_driver),
        )
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn list_drivers(State(state): State<AppState>) -> Result<Json<DriverListResponse>, AppError> {
    let response = DriverController::new(&state).list().await?;
    Ok(Json(response))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<DriverEnvelope>, AppError> {
    let response = DriverController::new(&state).get(&phone).await?;
    Ok(Json(response))
}

async fn create_driver(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    payload: Result<Json<CreateDriverRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DriverEnvelope>), AppError> {
    let response = DriverController::new(&state)
        .create(&actor, json_body(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_driver(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(phone): Path<String>,
    payload: Result<Json<UpdateDriverRequest>, JsonRejection>,
) -> Result<Json<DriverEnvelope>, AppError> {
    let response = DriverController::new(&state)
        .update(&actor, &phone, json_body(payload))
        .await?;
    Ok(Json(response))
}

async fn delete_driver(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(phone): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let response = DriverController::new(&state).delete(&actor, &phone).await?;
    Ok(Json(response))
}
