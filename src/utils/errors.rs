//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    // Errores de entrada del cliente
    #[error("Invalid license plate format: {0}. Example: ABC1D23")]
    InvalidPlateFormat(String),

    #[error("Field {0} is required")]
    MissingField(String),

    #[error("Invalid date format: {0}")]
    InvalidTimestamp(String),

    #[error("Unsupported event type: {0}")]
    UnsupportedEventType(String),

    // Conflictos de estado del dominio
    #[error("No active entry found for plate {0}")]
    NoActiveEntry(String),

    #[error("Vehicle with plate {0} is already inside")]
    VehicleAlreadyEntered(String),

    #[error("Vehicle with plate {0} already has a spot assigned for this stay")]
    VehicleAlreadyParked(String),

    #[error("Spot not found for the provided coordinates")]
    SpotNotFound,

    #[error("Spot is already occupied")]
    SpotOccupied,

    #[error("Sector {0} is closed at this time")]
    SectorClosed(String),

    #[error("Sector {0} is full, cannot assign spot")]
    SectorFull(String),

    // Errores operacionales
    #[error("Sector has no registered parking spots: {0}")]
    SectorMisconfigured(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        // Un timeout del pool es indisponibilidad del storage, no un error de dominio
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::StorageUnavailable(e.to_string())
            }
            other => AppError::Database(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidPlateFormat(_)
            | AppError::MissingField(_)
            | AppError::InvalidTimestamp(_)
            | AppError::UnsupportedEventType(_)
            | AppError::NoActiveEntry(_)
            | AppError::SpotNotFound => StatusCode::BAD_REQUEST,

            AppError::VehicleAlreadyEntered(_)
            | AppError::VehicleAlreadyParked(_)
            | AppError::SpotOccupied
            | AppError::SectorClosed(_)
            | AppError::SectorFull(_) => StatusCode::CONFLICT,

            AppError::NotFound(_) => StatusCode::NOT_FOUND,

            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,

            AppError::SectorMisconfigured(_)
            | AppError::Database(_)
            | AppError::ExternalApi(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            // No filtrar detalles internos al cliente
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "An error occurred while accessing the database".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "success": false,
            "message": message,
            "data": null,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_bad_request() {
        let response = AppError::InvalidPlateFormat("XX".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::NoActiveEntry("ABC1D23".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_state_conflicts_map_to_conflict() {
        let response = AppError::SpotOccupied.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::VehicleAlreadyEntered("ABC1D23".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::VehicleAlreadyParked("ABC1D23".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::SectorFull("A".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_pool_timeout_maps_to_storage_unavailable() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_misconfigured_sector_is_server_error() {
        let response = AppError::SectorMisconfigured("A".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
