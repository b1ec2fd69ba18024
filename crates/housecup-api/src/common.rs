// Common DTOs for the public API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error payload returned by `/api/*` endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description of the failure
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
