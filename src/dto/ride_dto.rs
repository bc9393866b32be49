use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ride::{format_timestamp, parse_departure, round_cost, NewRide, Ride, RideAvailability};
use crate::utils::errors::{validation_error, AppResult};

// Request para ofrecer un viaje
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRideRequest {
    #[validate(custom = "crate::utils::validation::validate_departure")]
    pub departure: String,

    #[validate(custom = "crate::utils::validation::validate_not_blank")]
    pub origin: String,

    #[validate(custom = "crate::utils::validation::validate_not_blank")]
    pub destination: String,

    #[validate(custom = "crate::utils::validation::validate_not_blank")]
    pub vehicle_number_plate: String,

    #[validate(range(min = 1, max = 60, message = "capacity must be between 1 and 60"))]
    pub capacity: i32,

    #[validate(range(min = 0.0, message = "cost cannot be negative"))]
    pub cost: f64,
}

impl CreateRideRequest {
    pub fn into_new_ride(self, driver: &str) -> AppResult<NewRide> {
        let departure = parse_departure(&self.departure)
            .map_err(|_| validation_error("departure", "departure must look like 'Jun 25 2018 1:30PM'"))?;
        let cost = round_cost(self.cost).ok_or_else(|| validation_error("cost", "cost must be a valid amount"))?;

        Ok(NewRide {
            driver: driver.to_string(),
            departure,
            origin: self.origin.trim().to_string(),
            destination: self.destination.trim().to_string(),
            vehicle_number_plate: self.vehicle_number_plate.trim().to_string(),
            capacity: self.capacity,
            cost,
        })
    }
}

// Request para marcar un viaje como taken/cancelled
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRideStatusRequest {
    #[validate(custom = "crate::utils::validation::validate_ride_status_update")]
    pub status: String,
}

/// Proyección pública de un viaje (misma forma en detalle y listado)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideView {
    pub ride_id: i64,
    pub departure: String,
    pub origin: String,
    pub destination: String,
    pub cost: f64,
    pub vehicle_number_plate: String,
    pub capacity: i32,
    #[serde(rename = "dateoffered")]
    pub date_offered: String,
    pub availability: RideAvailability,
}

impl From<&Ride> for RideView {
    fn from(ride: &Ride) -> Self {
        Self {
            ride_id: ride.ride_id,
            departure: format_timestamp(&ride.departure),
            origin: ride.origin.clone(),
            destination: ride.destination.clone(),
            cost: ride.cost,
            vehicle_number_plate: ride.vehicle_number_plate.clone(),
            capacity: ride.capacity,
            date_offered: format_timestamp(&ride.date_offered),
            availability: ride.availability,
        }
    }
}
