//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Todos los almacenes viven aquí; no hay
//! estado global.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::ride_repository::{InMemoryRideStore, RideStore};
use crate::repositories::ride_request_repository::RideRequestRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
    pub rides: Arc<dyn RideStore>,
    pub users: Arc<UserRepository>,
    pub vehicles: Arc<VehicleRepository>,
    pub ride_requests: Arc<RideRequestRepository>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, rides: Arc<dyn RideStore>) -> Self {
        Self {
            jwt: JwtConfig::from(&config),
            config,
            rides,
            users: Arc::new(UserRepository::new()),
            vehicles: Arc::new(VehicleRepository::new()),
            ride_requests: Arc::new(RideRequestRepository::new()),
        }
    }

    /// Estado con todos los almacenes en memoria
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        Self::new(config, Arc::new(InMemoryRideStore::new()))
    }
}
