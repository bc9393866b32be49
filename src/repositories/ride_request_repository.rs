//! Solicitudes de plaza en memoria

use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use crate::models::ride_request::{RequestStatus, RideRequest};
use crate::services::ride_rules;
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
pub struct RideRequestRepository {
    requests: RwLock<Vec<RideRequest>>,
}

impl RideRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crear una solicitud `pending`; un pasajero sólo puede pedir una vez por viaje
    pub async fn create(&self, ride_id: i64, passenger: &str, date_requested: NaiveDateTime) -> AppResult<RideRequest> {
        let mut requests = self.requests.write().await;

        if requests.iter().any(|r| r.ride_id == ride_id && r.passenger == passenger) {
            return Err(AppError::Conflict(format!(
                "You have already requested a seat on ride {}",
                ride_id
            )));
        }

        let request = RideRequest {
            request_id: ride_rules::next_id(requests.iter().map(|r| r.request_id)),
            ride_id,
            passenger: passenger.to_string(),
            status: RequestStatus::Pending,
            date_requested,
        };
        requests.push(request.clone());
        Ok(request)
    }

    pub async fn find_by_ride(&self, ride_id: i64) -> Vec<RideRequest> {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.ride_id == ride_id)
            .cloned()
            .collect()
    }

    /// Responder una solicitud `pending` del viaje. Al aceptar se comprueba
    /// la capacidad dentro del mismo lock.
    pub async fn respond(
        &self,
        ride_id: i64,
        request_id: i64,
        next: RequestStatus,
        capacity: i32,
    ) -> AppResult<Option<RideRequest>> {
        let mut requests = self.requests.write().await;

        let accepted = requests
            .iter()
            .filter(|r| r.ride_id == ride_id && r.status == RequestStatus::Accepted)
            .count();

        let Some(request) = requests
            .iter_mut()
            .find(|r| r.ride_id == ride_id && r.request_id == request_id)
        else {
            return Ok(None);
        };

        if !ride_rules::can_transition_request(request.status, next) {
            return Err(AppError::Conflict(format!(
                "Request {} is already {}",
                request_id, request.status
            )));
        }
        if next == RequestStatus::Accepted && accepted >= capacity.max(0) as usize {
            return Err(AppError::Conflict(format!("Ride {} is fully booked", ride_id)));
        }

        request.status = next;
        Ok(Some(request.clone()))
    }
}
