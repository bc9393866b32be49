use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use serde_json::json;

use crate::dto::response::{ApiResponse, Created};
use crate::dto::ride_dto::{CreateRideRequest, RideView, UpdateRideStatusRequest};
use crate::models::ride::{ride_location, Ride, RideAvailability};
use crate::repositories::ride_repository::RideStore;
use crate::services::ride_rules;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};

pub fn ride_not_found(ride_id: i64) -> AppError {
    not_found_error(ride_location(ride_id), "That ride doesn't exist")
}

pub struct RideController {
    rides: Arc<dyn RideStore>,
}

impl RideController {
    pub fn new(rides: Arc<dyn RideStore>) -> Self {
        Self { rides }
    }

    pub async fn create_ride(&self, driver: &str, request: CreateRideRequest) -> AppResult<Created<RideView>> {
        let new_ride = request.into_new_ride(driver)?;
        let ride = self.rides.insert_new(new_ride, now()).await?;
        log::info!("🚗 {} ofrecido por '{}'", ride, driver);

        let location = ride.location();
        let body = ApiResponse::success("Ride created successfully", RideView::from(&ride))
            .with_attributes(json!({
                "location": location,
                "repr": ride.to_string(),
            }));

        Ok(Created { location, body })
    }

    pub async fn fetch_one(&self, ride_id: i64) -> AppResult<ApiResponse<RideView>> {
        let ride = self.find(ride_id).await?;
        Ok(ApiResponse::success("Ride fetched successfully", RideView::from(&ride)))
    }

    pub async fn fetch_all(&self) -> AppResult<ApiResponse<Vec<RideView>>> {
        self.fetch_all_at(now()).await
    }

    /// Listado de viajes visibles respecto a `now`; los expirados sólo se ocultan
    pub async fn fetch_all_at(&self, now: NaiveDateTime) -> AppResult<ApiResponse<Vec<RideView>>> {
        let rides = ride_rules::visible_rides(self.rides.all().await?, now);
        let views: Vec<RideView> = rides.iter().map(RideView::from).collect();
        let count = views.len();

        Ok(ApiResponse::success("Rides fetched successfully", views).with_meta(json!({ "rides": count })))
    }

    pub async fn update_status(
        &self,
        driver: &str,
        ride_id: i64,
        request: UpdateRideStatusRequest,
    ) -> AppResult<ApiResponse<RideView>> {
        let next = request
            .status
            .parse::<RideAvailability>()
            .map_err(|_| validation_error("status", "status must be one of: taken, cancelled"))?;

        let mut ride = self.find(ride_id).await?;
        if ride.driver != driver {
            return Err(AppError::Forbidden("Only the driver who offered this ride can update it".to_string()));
        }
        if !ride_rules::can_transition(ride.availability, next) {
            return Err(AppError::Conflict(format!(
                "Ride {} is already {} and cannot become {}",
                ride_id, ride.availability, next
            )));
        }

        let changed = self
            .rides
            .compare_and_set_availability(ride_id, ride.availability, next)
            .await?;
        if !changed {
            return Err(AppError::Conflict(format!("Ride {} was updated by another request", ride_id)));
        }

        log::info!("🔄 Viaje {}: {} -> {}", ride_id, ride.availability, next);
        ride.availability = next;
        Ok(ApiResponse::success("Ride updated successfully", RideView::from(&ride)))
    }

    pub async fn find(&self, ride_id: i64) -> AppResult<Ride> {
        self.rides.get(ride_id).await?.ok_or_else(|| ride_not_found(ride_id))
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ride::{format_timestamp, parse_departure};
    use crate::repositories::ride_repository::InMemoryRideStore;
    use chrono::Duration;

    fn controller() -> RideController {
        RideController::new(Arc::new(InMemoryRideStore::new()))
    }

    fn create_request(departure: &str) -> CreateRideRequest {
        CreateRideRequest {
            departure: departure.to_string(),
            origin: "Nairobi".to_string(),
            destination: "Garissa".to_string(),
            vehicle_number_plate: "KBC-A21".to_string(),
            capacity: 3,
            cost: 350.0,
        }
    }

    fn next_year() -> String {
        format_timestamp(&(now() + Duration::days(365)))
    }

    fn status(value: &str) -> UpdateRideStatusRequest {
        UpdateRideStatusRequest {
            status: value.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let controller = controller();
        for expected in 1..=4 {
            let created = controller.create_ride("jdoe", create_request(&next_year())).await.unwrap();
            assert_eq!(created.location, format!("/rides/{}", expected));
            assert_eq!(created.body.data.as_ref().unwrap().ride_id, expected);
        }
    }

    #[tokio::test]
    async fn test_create_then_fetch_one() {
        let controller = controller();
        let departure = next_year();
        controller.create_ride("jdoe", create_request(&departure)).await.unwrap();

        let fetched = controller.fetch_one(1).await.unwrap();
        assert_eq!(fetched.message, "Ride fetched successfully");
        let view = fetched.data.unwrap();
        assert_eq!(view.departure, departure);
        assert_eq!(view.origin, "Nairobi");
        assert_eq!(view.destination, "Garissa");
        assert_eq!(view.vehicle_number_plate, "KBC-A21");
        assert_eq!(view.capacity, 3);
        assert_eq!(view.cost, 350.0);
        assert_eq!(view.availability, RideAvailability::Available);
    }

    #[tokio::test]
    async fn test_fetch_one_missing() {
        let err = controller().fetch_one(6454).await.unwrap_err();
        match err {
            AppError::NotFound { path, .. } => assert_eq!(path, "/rides/6454"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_all_skips_expired_rides() {
        let controller = controller();
        controller.create_ride("jdoe", create_request("Jun 25 2018  1:30PM")).await.unwrap();
        controller.create_ride("jdoe", create_request(&next_year())).await.unwrap();

        let all = controller.fetch_all().await.unwrap();
        assert_eq!(all.meta.unwrap()["rides"], 1);
        let rides = all.data.unwrap();
        assert_eq!(rides.len(), 1);
        assert_eq!(rides[0].ride_id, 2);

        // El viaje expirado sigue existiendo
        assert!(controller.fetch_one(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_all_at_is_strict_about_departure() {
        let controller = controller();
        controller.create_ride("jdoe", create_request("Jul 01 2030 12:00PM")).await.unwrap();

        let at_departure = parse_departure("Jul 01 2030 12:00PM").unwrap();
        let visible = controller.fetch_all_at(at_departure).await.unwrap();
        assert_eq!(visible.data.unwrap().len(), 1);

        let after = controller.fetch_all_at(at_departure + Duration::minutes(1)).await.unwrap();
        assert!(after.data.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_taken_and_cancelled_rides_are_hidden() {
        let controller = controller();
        controller.create_ride("jdoe", create_request(&next_year())).await.unwrap();
        controller.create_ride("jdoe", create_request(&next_year())).await.unwrap();

        controller.update_status("jdoe", 1, status("taken")).await.unwrap();
        let all = controller.fetch_all().await.unwrap();
        assert_eq!(all.meta.unwrap()["rides"], 1);

        controller.update_status("jdoe", 2, status("cancelled")).await.unwrap();
        let all = controller.fetch_all().await.unwrap();
        assert_eq!(all.meta.unwrap()["rides"], 0);
    }

    #[tokio::test]
    async fn test_update_status_rules() {
        let controller = controller();
        controller.create_ride("jdoe", create_request(&next_year())).await.unwrap();

        let forbidden = controller.update_status("intruder", 1, status("taken")).await;
        assert!(matches!(forbidden, Err(AppError::Forbidden(_))));

        let invalid = controller.update_status("jdoe", 1, status("available")).await;
        assert!(matches!(invalid, Err(AppError::Conflict(_))));

        let updated = controller.update_status("jdoe", 1, status("taken")).await.unwrap();
        assert_eq!(updated.data.unwrap().availability, RideAvailability::Taken);

        let terminal = controller.update_status("jdoe", 1, status("cancelled")).await;
        assert!(matches!(terminal, Err(AppError::Conflict(_))));

        let unknown = controller.update_status("jdoe", 1, status("gone")).await;
        assert!(matches!(unknown, Err(AppError::Validation(_))));

        let missing = controller.update_status("jdoe", 99, status("taken")).await;
        assert!(matches!(missing, Err(AppError::NotFound { .. })));
    }
}
