//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

const DEV_JWT_SECRET: &str = "development-only-secret";

/// Máximo de vida de un token: 10 años
pub const MAX_JWT_EXPIRATION: u64 = 10 * 365 * 24 * 60 * 60;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub bcrypt_cost: u32,
    pub database_url: Option<String>,
}

impl EnvironmentConfig {
    /// Leer la configuración del entorno (tras `dotenv()`)
    pub fn from_env() -> Result<Self> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == "development" => DEV_JWT_SECRET.to_string(),
            _ => return Err(anyhow!("JWT_SECRET must be set outside development")),
        };

        Ok(Self {
            port: parse_var("PORT", 3000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret,
            jwt_expiration: check_jwt_expiration(parse_var("JWT_EXPIRATION", 86_400)?)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| split_origins(&origins))
                .unwrap_or_default(),
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            environment,
        })
    }

    /// Configuración para tests: hashing barato y almacén en memoria
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: 3600,
            cors_origins: Vec::new(),
            bcrypt_cost: 4,
            database_url: None,
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number, got '{}'", name, value)),
        Err(_) => Ok(default),
    }
}

fn check_jwt_expiration(seconds: u64) -> Result<u64> {
    if seconds == 0 || seconds > MAX_JWT_EXPIRATION {
        return Err(anyhow!(
            "JWT_EXPIRATION must be between 1 and {} seconds, got {}",
            MAX_JWT_EXPIRATION,
            seconds
        ));
    }
    Ok(seconds)
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_origins() {
        assert_eq!(
            split_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(split_origins("").is_empty());
    }

    #[test]
    fn test_jwt_expiration_bounds() {
        assert_eq!(check_jwt_expiration(86_400).unwrap(), 86_400);
        assert_eq!(check_jwt_expiration(MAX_JWT_EXPIRATION).unwrap(), MAX_JWT_EXPIRATION);
        assert!(check_jwt_expiration(0).is_err());
        assert!(check_jwt_expiration(1_000_000_000_000_000).is_err());
    }

    #[test]
    fn test_for_tests_is_cheap() {
        let config = EnvironmentConfig::for_tests();
        assert_eq!(config.bcrypt_cost, 4);
        assert!(config.database_url.is_none());
        assert!(!config.is_production());
        assert_eq!(config.server_url(), "127.0.0.1:0");
    }
}
