//! Autenticación JWT
//!
//! `AuthenticatedUser` es un extractor: los handlers que lo piden quedan
//! protegidos, los demás son públicos.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{
    models::user::UserType,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en los handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
    pub user_type: UserType,
}

impl AuthenticatedUser {
    /// Sólo los conductores pueden ofrecer viajes y registrar vehículos
    pub fn require_driver(&self) -> Result<(), AppError> {
        if self.user_type != UserType::Driver {
            return Err(AppError::Forbidden("Only drivers can perform this action".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

        let token = extract_token_from_header(auth_header)?;
        let claims = verify_token(token, &state.jwt)?;

        // El token puede sobrevivir a una cuenta que ya no existe
        if state.users.find_by_username(&claims.sub).await.is_none() {
            return Err(AppError::Unauthorized("User not found".to_string()));
        }

        Ok(Self {
            username: claims.sub,
            user_type: claims.user_type,
        })
    }
}
