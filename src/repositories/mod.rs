//! Repositorios
//!
//! Acceso a datos: viajes (memoria o PostgreSQL), usuarios, vehículos y
//! solicitudes (memoria).

pub mod pg_ride_repository;
pub mod ride_repository;
pub mod ride_request_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use pg_ride_repository::PgRideStore;
pub use ride_repository::{InMemoryRideStore, RideStore};
