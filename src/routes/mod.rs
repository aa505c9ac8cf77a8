//! Rutas HTTP
//!
//! Todas las rutas de la API cuelgan de `/api`; `/health` queda fuera
//! y sin autenticación. Las colecciones responden con y sin barra final
//! (`/api/drivers` y `/api/drivers/`).

pub mod auth_routes;
pub mod driver_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::{extract::rejection::JsonRejection, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::cors_layer;
use crate::state::AppState;
use crate::utils::errors::AppResult;

/// Router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes::create_auth_router(state.clone()))
        .merge(driver_routes::create_driver_router(state.clone()))
        .merge(vehicle_routes::create_vehicle_router(state.clone()))
        .merge(user_routes::create_user_router(state.clone()));

    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Cuerpo JSON ya extraído. Los controladores deciden cuándo propagar el
/// error, de modo que la autorización se evalúa antes que el cuerpo.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload.map(|Json(body)| body).map_err(Into::into)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
