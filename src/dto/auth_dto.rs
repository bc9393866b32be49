use serde::{Deserialize, Serialize};
use validator::Validate;

// Request de registro
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(regex(
        path = "crate::utils::validation::USERNAME_REGEX",
        message = "username must be 3 to 30 letters, digits or underscores"
    ))]
    pub username: String,

    #[validate(custom = "crate::utils::validation::validate_not_blank")]
    pub name: String,

    #[validate(custom = "crate::utils::validation::validate_gender")]
    pub gender: String,

    #[validate(custom = "crate::utils::validation::validate_user_type")]
    pub usertype: String,

    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "password must be at least 8 characters long"))]
    pub password: String,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub contacts: String,
}

// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom = "crate::utils::validation::validate_not_blank")]
    pub username: String,

    #[validate(custom = "crate::utils::validation::validate_not_blank")]
    pub password: String,
}

// Token emitido tras el login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signup(value: serde_json::Value) -> SignupRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_signup() {
        let req = signup(json!({
            "username": "jdoe",
            "name": "John Doe",
            "gender": "male",
            "usertype": "driver",
            "email": "jdoe@example.com",
            "password": "s3cretpass",
            "contacts": "0712345678"
        }));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_invalid_signup_fields() {
        let req = signup(json!({
            "username": "j d",
            "name": "",
            "gender": "robot",
            "usertype": "admin",
            "email": "not-an-email",
            "password": "short",
            "contacts": "12"
        }));
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 7);
    }
}
