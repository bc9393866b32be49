//! Carpool API
//!
//! Backend de viajes compartidos: cuentas, vehículos, viajes ofrecidos y
//! solicitudes de plaza.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
