use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::response::{ApiResponse, Created};
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::vehicle::VehicleResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ValidJson;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new().route("/", get(list_vehicles).post(create_vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidJson(request): ValidJson<CreateVehicleRequest>,
) -> Result<Created<VehicleResponse>, AppError> {
    user.require_driver()?;
    let controller = VehicleController::new(state.vehicles.clone());
    controller.create(&user.username, request).await
}

async fn list_vehicles(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<VehicleResponse>>>, AppError> {
    user.require_driver()?;
    let controller = VehicleController::new(state.vehicles.clone());
    let response = controller.list_by_owner(&user.username).await?;
    Ok(Json(response))
}
