//! Rutas de la API
//!
//! Todas las rutas cuelgan de `/api/v2`.

pub mod auth_routes;
pub mod ride_routes;
pub mod vehicle_routes;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v2";

/// Construir el router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/rides", ride_routes::create_ride_router());

    Router::new()
        .nest(API_PREFIX, api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors_layer(&state.config.cors_origins)),
        )
        .with_state(state)
}

/// Endpoint de salud simple
async fn health() -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": "Carpool API is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
