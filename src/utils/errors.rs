//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión al sobre de respuesta uniforme (`status: failed`).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::dto::response::ApiResponse;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {path}")]
    NotFound { path: String, info: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Hash(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Construir el sobre `failed` correspondiente a este error
    pub fn to_envelope(&self) -> ApiResponse {
        match self {
            AppError::NotFound { path, info } => {
                ApiResponse::failed("NOT FOUND", info.clone())
                    .with_meta(json!({ "errors": 1, "source": path }))
            }
            AppError::Validation(errors) => {
                let fields = field_messages(errors);
                let count = fields.values().filter_map(Value::as_array).map(Vec::len).sum::<usize>();
                ApiResponse::failed("UNPROCESSABLE ENTITY", "The provided data is invalid")
                    .with_meta(json!({ "errors": count }))
                    .with_errors(Value::Object(fields))
            }
            AppError::BadRequest(msg) => {
                ApiResponse::failed("BAD REQUEST", msg.clone()).with_meta(json!({ "errors": 1 }))
            }
            AppError::Unauthorized(msg) | AppError::Jwt(msg) => {
                ApiResponse::failed("UNAUTHORIZED", msg.clone()).with_meta(json!({ "errors": 1 }))
            }
            AppError::Forbidden(msg) => {
                ApiResponse::failed("FORBIDDEN", msg.clone()).with_meta(json!({ "errors": 1 }))
            }
            AppError::Conflict(msg) => {
                ApiResponse::failed("CONFLICT", msg.clone()).with_meta(json!({ "errors": 1 }))
            }
            // Los detalles internos no se exponen al cliente
            AppError::Database(_) | AppError::Hash(_) | AppError::Internal(_) => {
                ApiResponse::failed("INTERNAL SERVER ERROR", "An unexpected error occurred")
                    .with_meta(json!({ "errors": 1 }))
            }
        }
    }
}

fn field_messages(errors: &validator::ValidationErrors) -> Map<String, Value> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => Value::String(message.to_string()),
                    None => Value::String(format!("{} is invalid ({})", field, e.code)),
                })
                .collect();
            (field.to_string(), Value::Array(messages))
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("❌ {}", self);
        } else {
            log::warn!("⚠️ {}", self);
        }

        (status, Json(self.to_envelope())).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(path: impl Into<String>, info: impl Into<String>) -> AppError {
    AppError::NotFound {
        path: path.into(),
        info: info.into(),
    }
}

/// Función helper para crear errores de validación de un solo campo
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    let mut error = validator::ValidationError::new("invalid");
    error.message = Some(message.into());

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}
