//! Modelos de datos
//!
//! Entidades del dominio: viajes, solicitudes, usuarios y vehículos.

pub mod ride;
pub mod ride_request;
pub mod user;
pub mod vehicle;

pub use ride::{NewRide, Ride, RideAvailability};
pub use ride_request::{RequestStatus, RideRequest};
pub use user::{User, UserType};
pub use vehicle::Vehicle;
