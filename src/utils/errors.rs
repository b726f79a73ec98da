//! Sistema de manejo de errores
//!
//! Este módulo define los errores de la aplicación y su conversión a
//! respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::clients::nominatim_client::GeocodingError;
use crate::models::CoordinateError;
use crate::repositories::gateway::GatewayError;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(#[from] CoordinateError),

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("Busy: {0}")]
    Busy(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Geocoding error: {0}")]
    Geocoding(#[from] GeocodingError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Errores de entrada del usuario: se rechazan localmente, sin red
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::InvalidInput(_) | AppError::InvalidCoordinates(_)
        )
    }

    /// Mensaje corto para mostrar en la vista
    pub fn user_notice(&self) -> String {
        match self {
            AppError::Validation(_) => "The submitted data is invalid".to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::InvalidCoordinates(_) => "The selected coordinates are invalid".to_string(),
            AppError::ConfirmationRequired(msg) => msg.clone(),
            AppError::Busy(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Gateway(_) => "An error occurred while fetching data, please try again".to_string(),
            AppError::Geocoding(_) => "An error occurred while searching, please try again".to_string(),
            AppError::Config(_) | AppError::Internal(_) => "An unexpected error occurred".to_string(),
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
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.user_notice();
        let (status, error_response) = match self {
            AppError::Validation(e) => {
                log::warn!("⚠️ Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message,
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::InvalidInput(msg) => {
                log::warn!("⚠️ Invalid input: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message,
                        details: None,
                        code: Some("INVALID_INPUT".to_string()),
                    },
                )
            }

            AppError::InvalidCoordinates(e) => {
                log::warn!("⚠️ Invalid coordinates: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message,
                        details: Some(json!({ "coordinate_error": e.to_string() })),
                        code: Some("INVALID_COORDINATES".to_string()),
                    },
                )
            }

            AppError::ConfirmationRequired(msg) => {
                log::warn!("⚠️ Confirmation required: {}", msg);
                (
                    StatusCode::PRECONDITION_REQUIRED,
                    ErrorResponse {
                        error: "Confirmation Required".to_string(),
                        message,
                        details: None,
                        code: Some("CONFIRMATION_REQUIRED".to_string()),
                    },
                )
            }

            AppError::Busy(msg) => {
                log::warn!("⏳ Busy: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message,
                        details: None,
                        code: Some("OPERATION_IN_PROGRESS".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                log::warn!("🔍 Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::Gateway(e) => {
                log::error!("❌ Gateway error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "Gateway Error".to_string(),
                        message,
                        details: Some(json!({ "gateway_error": e.to_string() })),
                        code: Some("GATEWAY_ERROR".to_string()),
                    },
                )
            }

            AppError::Geocoding(e) => {
                log::error!("❌ Geocoding error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "External API Error".to_string(),
                        message,
                        details: Some(json!({ "geocoding_error": e.to_string() })),
                        code: Some("GEOCODING_ERROR".to_string()),
                    },
                )
            }

            AppError::Config(msg) | AppError::Internal(msg) => {
                log::error!("❌ Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message,
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de entrada inválida
pub fn invalid_input_error(message: &str) -> AppError {
    AppError::InvalidInput(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(invalid_input_error("empty").is_validation());
        assert!(AppError::InvalidCoordinates(CoordinateError::Missing("lat")).is_validation());
        assert!(!AppError::Internal("boom".to_string()).is_validation());
    }

    #[test]
    fn test_status_codes() {
        let response = AppError::ConfirmationRequired("confirm".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::PRECONDITION_REQUIRED);

        let response = AppError::Busy("busy".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = not_found_error("Listing", "7").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::Gateway(GatewayError::MissingCount).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
