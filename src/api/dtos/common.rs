use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response structure for API errors
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type (e.g., "Validation error", "Bad request")
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Stable machine-readable code (e.g., "VALIDATION_ERROR")
    pub code: String,
}
