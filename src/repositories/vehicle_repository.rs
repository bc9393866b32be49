//! Registro de vehículos en memoria

use tokio::sync::RwLock;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
pub struct VehicleRepository {
    vehicles: RwLock<Vec<Vehicle>>,
}

// Las matrículas se comparan sin espacios, guiones ni mayúsculas
fn plate_key(plate: &str) -> String {
    plate
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

impl VehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        let key = plate_key(&vehicle.number_plate);

        if vehicles.iter().any(|v| plate_key(&v.number_plate) == key) {
            return Err(AppError::Conflict(format!(
                "Vehicle with number plate '{}' already exists",
                vehicle.number_plate
            )));
        }

        vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    pub async fn find_by_owner(&self, owner: &str) -> Vec<Vehicle> {
        self.vehicles
            .read()
            .await
            .iter()
            .filter(|v| v.owner == owner)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ride::parse_departure;

    fn vehicle(plate: &str, owner: &str) -> Vehicle {
        Vehicle {
            number_plate: plate.to_string(),
            owner: owner.to_string(),
            model: "Toyota Noah".to_string(),
            capacity: 7,
            color: None,
            date_registered: parse_departure("Jun 20 2018 8:00AM").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_plate_ignores_formatting() {
        let repo = VehicleRepository::new();
        repo.create(vehicle("KBC-A21", "jdoe")).await.unwrap();

        let err = repo.create(vehicle("kbc a21", "other")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_find_by_owner() {
        let repo = VehicleRepository::new();
        repo.create(vehicle("KBC-A21", "jdoe")).await.unwrap();
        repo.create(vehicle("KCD-555X", "jdoe")).await.unwrap();
        repo.create(vehicle("KAA-001B", "other")).await.unwrap();

        assert_eq!(repo.find_by_owner("jdoe").await.len(), 2);
        assert!(repo.find_by_owner("nobody").await.is_empty());
    }
}
