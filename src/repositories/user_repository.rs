//! Registro de usuarios en memoria

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::models::user::User;
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
pub struct UserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl UserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insertar un usuario nuevo; username y email son únicos
    pub async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.username) {
            return Err(AppError::Conflict(format!("Username '{}' is already taken", user.username)));
        }
        if users.values().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(AppError::Conflict(format!("Email '{}' is already registered", user.email)));
        }

        users.insert(user.username.clone(), user.clone());
        log::info!("💾 Usuario '{}' registrado. Usuarios totales: {}", user.username, users.len());
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Option<User> {
        self.users.read().await.get(username).cloned()
    }
}
