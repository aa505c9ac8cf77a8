use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::VehicleController;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleEnvelope, VehicleListResponse,
};
use crate::dto::MessageResponse;
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::routes::json_body;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route("/vehicles/", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicles/:vehicle_number",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<VehicleListResponse>, AppError> {
    let response = VehicleController::new(&state).list().await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(vehicle_number): Path<String>,
) -> Result<Json<VehicleEnvelope>, AppError> {
    let response = VehicleController::new(&state).get(&vehicle_number).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    payload: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VehicleEnvelope>), AppError> {
    let response = VehicleController::new(&state)
        .create(&actor, json_body(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(vehicle_number): Path<String>,
    payload: Result<Json<UpdateVehicleRequest>, JsonRejection>,
) -> Result<Json<VehicleEnvelope>, AppError> {
    let response = VehicleController::new(&state)
        .update(&actor, &vehicle_number, json_body(payload))
        .await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(vehicle_number): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let response = VehicleController::new(&state)
        .delete(&actor, &vehicle_number)
        .await?;
    Ok(Json(response))
}
