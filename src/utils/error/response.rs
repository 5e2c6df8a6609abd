//! HTTP response handling for errors
//!
//! The wire shape is the handlers' contract: a flat `{"error": …}` object
//! with an optional `message` carrying the underlying cause. Status codes:
//! validation 400, tier failure 502 (tells an external orchestrator to
//! advance the chain), exhaustion 503, everything else 500.

use super::types::GatewayError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};

/// Wire error body returned by every handler
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    /// Short error description, stable across releases
    pub error: String,
    /// Underlying cause, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) | GatewayError::UnsupportedModel(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::TierFailed { .. } => StatusCode::BAD_GATEWAY,
            GatewayError::AllModelsUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            GatewayError::Validation(message) => ErrorBody {
                error: message.clone(),
                message: None,
            },
            GatewayError::UnsupportedModel(_) | GatewayError::TierFailed { .. } => ErrorBody {
                error: self.to_string(),
                message: None,
            },
            GatewayError::AllModelsUnavailable(last) => ErrorBody {
                error: "All models unavailable".to_string(),
                message: Some(last.clone()),
            },
            GatewayError::Internal(message) => ErrorBody {
                error: "Internal server error".to_string(),
                message: Some(message.clone()),
            },
            other => ErrorBody {
                error: "Internal server error".to_string(),
                message: Some(other.to_string()),
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
