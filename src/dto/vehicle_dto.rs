use serde::Deserialize;
use validator::Validate;

// Request para registrar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom = "crate::utils::validation::validate_license_plate")]
    pub number_plate: String,

    #[validate(custom = "crate::utils::validation::validate_not_blank")]
    pub model: String,

    #[validate(range(min = 1, max = 60, message = "capacity must be between 1 and 60"))]
    pub capacity: i32,

    #[validate(length(min = 2, max = 50, message = "color must be 2 to 50 characters"))]
    pub color: Option<String>,
}
