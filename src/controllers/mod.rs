//! Controladores
//!
//! Orquestan repositorios y reglas, y devuelven el sobre de respuesta.

pub mod auth_controller;
pub mod ride_controller;
pub mod ride_request_controller;
pub mod vehicle_controller;

pub use auth_controller::AuthController;
pub use ride_controller::RideController;
pub use ride_request_controller::RideRequestController;
pub use vehicle_controller::VehicleController;
