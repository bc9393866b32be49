//! Utilidades de validación
//!
//! Validadores semánticos usados por `#[derive(Validate)]` en los DTOs.
//! La presencia de los campos la garantiza la deserialización; aquí sólo
//! se comprueba que el contenido tenga sentido.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::models::ride::parse_departure;

lazy_static! {
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_]{3,30}$").unwrap();
}

pub const GENDERS: &[&str] = &["male", "female", "other"];
pub const USER_TYPES: &[&str] = &["driver", "passenger"];
pub const RIDE_STATUS_UPDATES: &[&str] = &["taken", "cancelled"];
pub const REQUEST_RESPONSES: &[&str] = &["accepted", "rejected"];

fn invalid(code: &'static str, message: String, value: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error.add_param("value".into(), &value.to_string());
    error
}

fn validate_one_of(value: &str, allowed: &[&str], field: &str) -> Result<(), ValidationError> {
    let normalized = value.trim().to_lowercase();
    if allowed.contains(&normalized.as_str()) {
        return Ok(());
    }
    Err(invalid(
        "one_of",
        format!("{} must be one of: {}", field, allowed.join(", ")),
        value,
    ))
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("not_blank", "This field cannot be blank".to_string(), value));
    }
    Ok(())
}

/// Validar fecha de salida (`Jun 25 2018 1:30PM`)
pub fn validate_departure(value: &str) -> Result<(), ValidationError> {
    parse_departure(value).map(|_| ()).map_err(|_| {
        invalid(
            "departure",
            "departure must look like 'Jun 25 2018 1:30PM'".to_string(),
            value,
        )
    })
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let allowed = value.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-'));
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !allowed || !(10..=15).contains(&digits) {
        return Err(invalid(
            "phone",
            "contacts must be a phone number with 10 to 15 digits".to_string(),
            value,
        ));
    }
    Ok(())
}

/// Validar formato de matrícula de vehículo
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    let clean_plate = value.replace([' ', '-', '_'], "");
    let alphanumeric = clean_plate.chars().all(|c| c.is_ascii_alphanumeric());
    if !alphanumeric || clean_plate.len() < 5 || clean_plate.len() > 10 {
        return Err(invalid(
            "license_plate",
            "number plate must have 5 to 10 letters or digits".to_string(),
            value,
        ));
    }
    Ok(())
}

pub fn validate_gender(value: &str) -> Result<(), ValidationError> {
    validate_one_of(value, GENDERS, "gender")
}

pub fn validate_user_type(value: &str) -> Result<(), ValidationError> {
    validate_one_of(value, USER_TYPES, "usertype")
}

pub fn validate_ride_status_update(value: &str) -> Result<(), ValidationError> {
    validate_one_of(value, RIDE_STATUS_UPDATES, "status")
}

pub fn validate_request_response(value: &str) -> Result<(), ValidationError> {
    validate_one_of(value, REQUEST_RESPONSES, "status")
}
