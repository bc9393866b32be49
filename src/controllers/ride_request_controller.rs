use std::sync::Arc;

use chrono::Local;
use serde_json::json;

use crate::controllers::ride_controller::ride_not_found;
use crate::dto::response::{ApiResponse, Created};
use crate::dto::ride_request_dto::{RespondRideRequest, RideRequestView};
use crate::models::ride::{ride_location, Ride};
use crate::models::ride_request::RequestStatus;
use crate::repositories::ride_repository::RideStore;
use crate::repositories::ride_request_repository::RideRequestRepository;
use crate::services::ride_rules;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};

pub struct RideRequestController {
    rides: Arc<dyn RideStore>,
    requests: Arc<RideRequestRepository>,
}

impl RideRequestController {
    pub fn new(rides: Arc<dyn RideStore>, requests: Arc<RideRequestRepository>) -> Self {
        Self { rides, requests }
    }

    pub async fn create(&self, passenger: &str, ride_id: i64) -> AppResult<Created<RideRequestView>> {
        let ride = self.find_ride(ride_id).await?;

        if ride.driver == passenger {
            return Err(AppError::Forbidden("You cannot request a seat on your own ride".to_string()));
        }

        let now = Local::now().naive_local();
        if !ride_rules::accepts_requests(&ride, now) {
            return Err(AppError::Conflict(format!(
                "Ride {} is no longer accepting requests",
                ride_id
            )));
        }

        let request = self.requests.create(ride_id, passenger, now).await?;
        log::info!("🙋 '{}' solicita plaza en el viaje {}", passenger, ride_id);

        let location = format!("{}/requests/{}", ride_location(ride_id), request.request_id);
        let body = ApiResponse::success("Ride request created successfully", RideRequestView::from(&request))
            .with_attributes(json!({ "location": location }));

        Ok(Created { location, body })
    }

    pub async fn list(&self, driver: &str, ride_id: i64) -> AppResult<ApiResponse<Vec<RideRequestView>>> {
        let ride = self.find_ride(ride_id).await?;
        ensure_owner(&ride, driver)?;

        let views: Vec<RideRequestView> = self
            .requests
            .find_by_ride(ride_id)
            .await
            .iter()
            .map(RideRequestView::from)
            .collect();
        let count = views.len();

        Ok(ApiResponse::success("Ride requests fetched successfully", views).with_meta(json!({ "requests": count })))
    }

    pub async fn respond(
        &self,
        driver: &str,
        ride_id: i64,
        request_id: i64,
        response: RespondRideRequest,
    ) -> AppResult<ApiResponse<RideRequestView>> {
        let next = response
            .status
            .parse::<RequestStatus>()
            .map_err(|_| validation_error("status", "status must be one of: accepted, rejected"))?;

        let ride = self.find_ride(ride_id).await?;
        ensure_owner(&ride, driver)?;

        let request = self
            .requests
            .respond(ride_id, request_id, next, ride.capacity)
            .await?
            .ok_or_else(|| {
                not_found_error(
                    format!("{}/requests/{}", ride_location(ride_id), request_id),
                    "That ride request doesn't exist",
                )
            })?;

        Ok(ApiResponse::success("Ride request updated successfully", RideRequestView::from(&request)))
    }

    async fn find_ride(&self, ride_id: i64) -> AppResult<Ride> {
        self.rides.get(ride_id).await?.ok_or_else(|| ride_not_found(ride_id))
    }
}

fn ensure_owner(ride: &Ride, driver: &str) -> AppResult<()> {
    if ride.driver != driver {
        return Err(AppError::Forbidden("Only the driver who offered this ride can manage its requests".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ride::{parse_departure, NewRide, RideAvailability};
    use crate::repositories::ride_repository::InMemoryRideStore;
    use chrono::Duration;

    async fn setup() -> (RideRequestController, Arc<dyn RideStore>) {
        let rides: Arc<dyn RideStore> = Arc::new(InMemoryRideStore::new());
        let new_ride = NewRide {
            driver: "driver".to_string(),
            departure: Local::now().naive_local() + Duration::days(30),
            origin: "Nairobi".to_string(),
            destination: "Garissa".to_string(),
            vehicle_number_plate: "KBC-A21".to_string(),
            capacity: 1,
            cost: 350.0,
        };
        rides.insert_new(new_ride, parse_departure("Jun 20 2018 9:00AM").unwrap()).await.unwrap();
        let controller = RideRequestController::new(rides.clone(), Arc::new(RideRequestRepository::new()));
        (controller, rides)
    }

    fn respond(status: &str) -> RespondRideRequest {
        RespondRideRequest {
            status: status.to_string(),
        }
    }

    #[tokio::test]
    async fn test_request_lifecycle() {
        let (controller, _) = setup().await;
        let created = controller.create("alice", 1).await.unwrap();
        assert_eq!(created.location, "/rides/1/requests/1");

        let listed = controller.list("driver", 1).await.unwrap();
        assert_eq!(listed.meta.unwrap()["requests"], 1);

        let accepted = controller.respond("driver", 1, 1, respond("accepted")).await.unwrap();
        assert_eq!(accepted.data.unwrap().status, RequestStatus::Accepted);
    }

    #[tokio::test]
    async fn test_request_errors() {
        let (controller, rides) = setup().await;

        assert!(matches!(controller.create("alice", 6454).await, Err(AppError::NotFound { .. })));
        assert!(matches!(controller.create("driver", 1).await, Err(AppError::Forbidden(_))));
        assert!(matches!(controller.list("alice", 1).await, Err(AppError::Forbidden(_))));
        assert!(matches!(
            controller.respond("driver", 1, 7, respond("rejected")).await,
            Err(AppError::NotFound { .. })
        ));

        rides
            .compare_and_set_availability(1, RideAvailability::Available, RideAvailability::Cancelled)
            .await
            .unwrap();
        assert!(matches!(controller.create("bob", 1).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_expired_ride_does_not_accept_requests() {
        let (controller, rides) = setup().await;
        let past = NewRide {
            driver: "driver".to_string(),
            departure: parse_departure("Jun 25 2018 1:30PM").unwrap(),
            origin: "Garissa".to_string(),
            destination: "Nairobi".to_string(),
            vehicle_number_plate: "KBC-A21".to_string(),
            capacity: 3,
            cost: 500.0,
        };
        let ride = rides.insert_new(past, parse_departure("Jun 20 2018 9:00AM").unwrap()).await.unwrap();

        assert!(matches!(controller.create("alice", ride.ride_id).await, Err(AppError::Conflict(_))));
        assert!(controller.create("alice", 1).await.is_ok());
    }
}
