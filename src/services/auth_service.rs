//! Servicio de autenticación
//!
//! Registro de cuentas con hash bcrypt y emisión de tokens JWT.

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Local;

use crate::dto::auth_dto::{LoginRequest, SignupRequest, TokenResponse};
use crate::models::user::{User, UserType};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct AuthService {
    users: Arc<UserRepository>,
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<UserRepository>, jwt: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            users,
            jwt,
            bcrypt_cost,
        }
    }

    /// Registrar un nuevo usuario
    pub async fn signup(&self, request: SignupRequest) -> AppResult<User> {
        let usertype = request.usertype.parse::<UserType>().map_err(AppError::BadRequest)?;
        let password_hash = self.hash_password(request.password).await?;

        let user = User {
            username: request.username.trim().to_string(),
            name: request.name.trim().to_string(),
            gender: request.gender.trim().to_lowercase(),
            usertype,
            email: request.email.trim().to_lowercase(),
            password_hash,
            contacts: request.contacts.trim().to_string(),
            date_joined: Local::now().naive_local(),
        };

        self.users.create(user).await
    }

    /// Autenticar y emitir token de acceso
    pub async fn login(&self, request: LoginRequest) -> AppResult<TokenResponse> {
        let user = self
            .users
            .find_by_username(request.username.trim())
            .await
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !self.verify_password(request.password, user.password_hash.clone()).await? {
            log::warn!("🔐 Contraseña incorrecta para '{}'", user.username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let access_token = generate_token(&user.username, user.usertype, &self.jwt)?;
        log::info!("✅ Login exitoso para '{}' ({})", user.username, user.usertype);

        Ok(TokenResponse {
            access_token,
            token_type: "Bearer",
            expires_in: self.jwt.expiration,
        })
    }

    // bcrypt es costoso; se ejecuta fuera del runtime async
    async fn hash_password(&self, password: String) -> AppResult<String> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .map_err(|e| AppError::Hash(e.to_string()))
    }

    async fn verify_password(&self, password: String, password_hash: String) -> AppResult<bool> {
        tokio::task::spawn_blocking(move || verify(password, &password_hash))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .map_err(|e| AppError::Hash(e.to_string()))
    }
}
