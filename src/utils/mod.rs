//! Utilidades del sistema
//!
//! Errores, JWT, validación y extractores compartidos.

pub mod errors;
pub mod extract;
pub mod jwt;
pub mod validation;

pub use errors::{AppError, AppResult};
