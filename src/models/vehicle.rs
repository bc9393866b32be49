//! Modelo de Vehicle
//!
//! Vehículos registrados por conductores. Los viajes guardan la matrícula
//! como texto libre, sin referencia obligatoria a este registro.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::ride::format_timestamp;

#[derive(Debug, Clone)]
pub struct Vehicle {
    pub number_plate: String,
    pub owner: String,
    pub model: String,
    pub capacity: i32,
    pub color: Option<String>,
    pub date_registered: NaiveDateTime,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub number_plate: String,
    pub model: String,
    pub capacity: i32,
    pub color: Option<String>,
    pub date_registered: String,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            number_plate: vehicle.number_plate,
            model: vehicle.model,
            capacity: vehicle.capacity,
            color: vehicle.color,
            date_registered: format_timestamp(&vehicle.date_registered),
        }
    }
}
