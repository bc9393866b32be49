use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ride::format_timestamp;
use crate::models::ride_request::{RequestStatus, RideRequest};

// Request para aceptar o rechazar una solicitud
#[derive(Debug, Deserialize, Validate)]
pub struct RespondRideRequest {
    #[validate(custom = "crate::utils::validation::validate_request_response")]
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRequestView {
    pub request_id: i64,
    pub ride_id: i64,
    pub passenger: String,
    pub status: RequestStatus,
    pub date_requested: String,
}

impl From<&RideRequest> for RideRequestView {
    fn from(request: &RideRequest) -> Self {
        Self {
            request_id: request.request_id,
            ride_id: request.ride_id,
            passenger: request.passenger.clone(),
            status: request.status,
            date_requested: format_timestamp(&request.date_requested),
        }
    }
}
