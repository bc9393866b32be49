use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::ride_controller::RideController;
use crate::controllers::ride_request_controller::RideRequestController;
use crate::dto::response::{ApiResponse, Created};
use crate::dto::ride_dto::{CreateRideRequest, RideView, UpdateRideStatusRequest};
use crate::dto::ride_request_dto::{RespondRideRequest, RideRequestView};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{ValidJson, ValidPath};

pub fn create_ride_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rides).post(create_ride))
        .route("/:ride_id", get(get_ride).put(update_ride_status))
        .route("/:ride_id/requests", get(list_ride_requests).post(create_ride_request))
        .route("/:ride_id/requests/:request_id", put(respond_ride_request))
}

fn ride_controller(state: &AppState) -> RideController {
    RideController::new(state.rides.clone())
}

fn ride_request_controller(state: &AppState) -> RideRequestController {
    RideRequestController::new(state.rides.clone(), state.ride_requests.clone())
}

async fn create_ride(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidJson(request): ValidJson<CreateRideRequest>,
) -> Result<Created<RideView>, AppError> {
    user.require_driver()?;
    ride_controller(&state).create_ride(&user.username, request).await
}

async fn list_rides(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<RideView>>>, AppError> {
    let response = ride_controller(&state).fetch_all().await?;
    Ok(Json(response))
}

async fn get_ride(
    State(state): State<AppState>,
    ValidPath(ride_id): ValidPath<i64>,
) -> Result<Json<ApiResponse<RideView>>, AppError> {
    let response = ride_controller(&state).fetch_one(ride_id).await?;
    Ok(Json(response))
}

async fn update_ride_status(
    State(state): State<AppState>,
    ValidPath(ride_id): ValidPath<i64>,
    user: AuthenticatedUser,
    ValidJson(request): ValidJson<UpdateRideStatusRequest>,
) -> Result<Json<ApiResponse<RideView>>, AppError> {
    user.require_driver()?;
    let response = ride_controller(&state)
        .update_status(&user.username, ride_id, request)
        .await?;
    Ok(Json(response))
}

async fn create_ride_request(
    State(state): State<AppState>,
    ValidPath(ride_id): ValidPath<i64>,
    user: AuthenticatedUser,
) -> Result<Created<RideRequestView>, AppError> {
    ride_request_controller(&state).create(&user.username, ride_id).await
}

async fn list_ride_requests(
    State(state): State<AppState>,
    ValidPath(ride_id): ValidPath<i64>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<RideRequestView>>>, AppError> {
    user.require_driver()?;
    let response = ride_request_controller(&state).list(&user.username, ride_id).await?;
    Ok(Json(response))
}

async fn respond_ride_request(
    State(state): State<AppState>,
    ValidPath((ride_id, request_id)): ValidPath<(i64, i64)>,
    user: AuthenticatedUser,
    ValidJson(request): ValidJson<RespondRideRequest>,
) -> Result<Json<ApiResponse<RideRequestView>>, AppError> {
    user.require_driver()?;
    let response = ride_request_controller(&state)
        .respond(&user.username, ride_id, request_id, request)
        .await?;
    Ok(Json(response))
}
