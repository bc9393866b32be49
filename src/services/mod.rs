//! Servicios de negocio
//!
//! Reglas del ciclo de vida de los viajes y autenticación.

pub mod auth_service;
pub mod ride_rules;

pub use auth_service::AuthService;
