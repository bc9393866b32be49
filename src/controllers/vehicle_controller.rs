use std::sync::Arc;

use chrono::Local;
use serde_json::json;

use crate::dto::response::{ApiResponse, Created};
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::models::vehicle::{Vehicle, VehicleResponse};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppResult;

pub struct VehicleController {
    repository: Arc<VehicleRepository>,
}

impl VehicleController {
    pub fn new(repository: Arc<VehicleRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, owner: &str, request: CreateVehicleRequest) -> AppResult<Created<VehicleResponse>> {
        let vehicle = self
            .repository
            .create(Vehicle {
                number_plate: request.number_plate.trim().to_uppercase(),
                owner: owner.to_string(),
                model: request.model.trim().to_string(),
                capacity: request.capacity,
                color: request.color.map(|c| c.trim().to_string()),
                date_registered: Local::now().naive_local(),
            })
            .await?;

        let location = format!("/vehicles/{}", vehicle.number_plate);
        let body = ApiResponse::success("Vehicle registered successfully", VehicleResponse::from(vehicle))
            .with_attributes(json!({ "location": location }));

        Ok(Created { location, body })
    }

    pub async fn list_by_owner(&self, owner: &str) -> AppResult<ApiResponse<Vec<VehicleResponse>>> {
        let vehicles: Vec<VehicleResponse> = self
            .repository
            .find_by_owner(owner)
            .await
            .into_iter()
            .map(VehicleResponse::from)
            .collect();
        let count = vehicles.len();

        Ok(ApiResponse::success("Vehicles fetched successfully", vehicles).with_meta(json!({ "vehicles": count })))
    }
}
