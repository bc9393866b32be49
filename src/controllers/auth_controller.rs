use crate::dto::auth_dto::{LoginRequest, SignupRequest, TokenResponse};
use crate::dto::response::ApiResponse;
use crate::models::user::UserResponse;
use crate::services::auth_service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct AuthController {
    service: AuthService,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: AuthService::new(state.users.clone(), state.jwt.clone(), state.config.bcrypt_cost),
        }
    }

    /// Registrar cuenta (201 sin cabecera `Location`)
    pub async fn signup(&self, request: SignupRequest) -> AppResult<ApiResponse<UserResponse>> {
        let user = self.service.signup(request).await?;
        Ok(ApiResponse::success("Account created successfully", UserResponse::from(&user)))
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<ApiResponse<TokenResponse>> {
        let token = self.service.login(request).await?;
        Ok(ApiResponse::success("Login successful", token))
    }
}
