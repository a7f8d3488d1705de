use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failure resolving weather for a single coordinate.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UpstreamError {
    #[error("weather request failed: {0}")]
    Request(String),

    #[error("weather provider returned status {status}")]
    Status { status: u16 },

    #[error("weather request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("weather response could not be decoded: {0}")]
    Decode(String),

    #[error("coordinate {0} is not a finite latitude/longitude pair")]
    InvalidCoordinate(String),

    #[error("rate limiter is closed")]
    LimiterClosed,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid page or pageSize parameters")]
    InvalidPagination,

    #[error("Weather enrichment failed for {failed} of {total} locations")]
    AggregateEnrichmentFailure { failed: usize, total: usize },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidPagination => StatusCode::BAD_REQUEST,
            ApiError::AggregateEnrichmentFailure { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Internal(detail) => {
                log::error!("Internal error: {detail}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

impl From<deadpool_postgres::PoolError> for ApiError {
    fn from(e: deadpool_postgres::PoolError) -> Self {
        ApiError::Internal(format!("failed to get database connection: {e}"))
    }
}

impl From<tokio_postgres::Error> for ApiError {
    fn from(e: tokio_postgres::Error) -> Self {
        ApiError::Internal(format!("database query failed: {e}"))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}
