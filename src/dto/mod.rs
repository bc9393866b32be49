//! DTOs de la API
//!
//! Cuerpos de petición (con validación) y proyecciones de respuesta.

pub mod auth_dto;
pub mod response;
pub mod ride_dto;
pub mod ride_request_dto;
pub mod vehicle_dto;

pub use response::{ApiResponse, Created, ResponseStatus};
