//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Si es `true`, los errores internos incluyen el detalle en el body.
/// Se configura una sola vez al arrancar (ver `EnvironmentConfig::expose_error_details`).
static EXPOSE_DETAILS: AtomicBool = AtomicBool::new(false);

pub fn set_expose_error_details(enabled: bool) {
    EXPOSE_DETAILS.store(enabled, Ordering::Relaxed);
}

fn expose_details() -> bool {
    EXPOSE_DETAILS.load(Ordering::Relaxed)
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Seller not found: {0}")]
    SellerNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Domain rule violated: {0}")]
    DomainRule(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) | AppError::Hash(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ClientNotFound(_)
            | AppError::VehicleNotFound(_)
            | AppError::SellerNotFound(_)
            | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DomainRule(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<serde_json::Value>,
    code: String,
}

/// Error de "no encontrado" con el campo que lo originó, para que el
/// front-end pueda marcar el input correspondiente.
fn field_not_found(field: &str, label: &str, msg: String) -> ErrorResponse {
    warn!("Referencia no encontrada ({}): {}", field, msg);
    ErrorResponse {
        error: "Not Found".to_string(),
        message: msg.clone(),
        details: None,
        errors: Some(json!({ field: [msg] })),
        code: format!("{}_NOT_FOUND", label),
    }
}

/// Aplana `ValidationErrors` a `{campo: [mensajes]}`
fn flatten_validation_errors(errors: &validator::ValidationErrors) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("El campo {} es inválido ({})", field, e.code))
            })
            .collect();
        map.insert(field.to_string(), json!(messages));
    }
    serde_json::Value::Object(map)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = match self {
            AppError::Database(e) => {
                error!("Database error: {}", e);
                ErrorResponse {
                    error: "Database Error".to_string(),
                    message: "An error occurred while accessing the database".to_string(),
                    details: expose_details().then(|| json!({ "sql_error": e.to_string() })),
                    errors: None,
                    code: "DB_ERROR".to_string(),
                }
            }

            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: "The provided data is invalid".to_string(),
                    details: None,
                    errors: Some(flatten_validation_errors(&e)),
                    code: "VALIDATION_ERROR".to_string(),
                }
            }

            AppError::ClientNotFound(msg) => field_not_found("cliente_id", "CLIENT", msg),
            AppError::VehicleNotFound(msg) => field_not_found("vehiculo_id", "VEHICLE", msg),
            AppError::SellerNotFound(msg) => field_not_found("vendedor_id", "SELLER", msg),

            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    errors: None,
                    code: "NOT_FOUND".to_string(),
                }
            }

            AppError::DomainRule(msg) => {
                warn!("Domain rule violated: {}", msg);
                ErrorResponse {
                    error: "Domain Rule Violation".to_string(),
                    message: msg,
                    details: None,
                    errors: None,
                    code: "DOMAIN_RULE".to_string(),
                }
            }

            AppError::Unauthorized(msg) => {
                warn!("Unauthorized access: {}", msg);
                ErrorResponse {
                    error: "Unauthorized".to_string(),
                    message: msg,
                    details: None,
                    errors: None,
                    code: "UNAUTHORIZED".to_string(),
                }
            }

            AppError::Conflict(msg) => {
                warn!("Conflict: {}", msg);
                ErrorResponse {
                    error: "Conflict".to_string(),
                    message: msg,
                    details: None,
                    errors: None,
                    code: "CONFLICT".to_string(),
                }
            }

            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    details: None,
                    errors: None,
                    code: "BAD_REQUEST".to_string(),
                }
            }

            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: "An unexpected error occurred".to_string(),
                    details: expose_details().then(|| json!({ "internal_error": msg })),
                    errors: None,
                    code: "INTERNAL_ERROR".to_string(),
                }
            }

            AppError::Jwt(msg) => {
                warn!("JWT error: {}", msg);
                ErrorResponse {
                    error: "JWT Error".to_string(),
                    message: msg,
                    details: None,
                    errors: None,
                    code: "JWT_ERROR".to_string(),
                }
            }

            AppError::Hash(msg) => {
                error!("Hash error: {}", msg);
                ErrorResponse {
                    error: "Hash Error".to_string(),
                    message: "An error occurred while processing credentials".to_string(),
                    details: expose_details().then(|| json!({ "hash_error": msg })),
                    errors: None,
                    code: "HASH_ERROR".to_string(),
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación sobre un único campo
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    field_error(field, message)
}

/// Igual que `validation_error` pero con un mensaje armado en runtime
pub fn field_error(field: &'static str, message: impl Into<Cow<'static, str>>) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}

/// Una violación de UNIQUE se traduce con `on_violation`; el resto sigue siendo
/// un error de base de datos. Cubre la carrera entre el chequeo previo y el INSERT.
pub fn on_unique_violation(err: sqlx::Error, on_violation: impl FnOnce() -> AppError) -> AppError {
    let violated = matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation());
    if violated {
        on_violation()
    } else {
        AppError::Database(err)
    }
}

/// Igual que `on_unique_violation` para claves foráneas
pub fn on_foreign_key_violation(
    err: sqlx::Error,
    on_violation: impl FnOnce() -> AppError,
) -> AppError {
    let violated = matches!(&err, sqlx::Error::Database(db) if db.is_foreign_key_violation());
    if violated {
        on_violation()
    } else {
        AppError::Database(err)
    }
}
