use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::domain::customer::ApiError;
use crate::domain::errors::DirectoryError;

/// Rejections of the reference directory endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("{message}")]
    Invalid { code: String, message: String },

    #[error("{message}")]
    Conflict { code: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EndpointError {
    pub fn invalid(code: &str, message: impl Into<String>) -> Self {
        EndpointError::Invalid {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        match self {
            EndpointError::Invalid { code, message } | EndpointError::Conflict { code, message } => {
                ApiError::new(code.as_str(), message.as_str())
            }
            EndpointError::Internal(_) => ApiError::new("internal", "Internal server error"),
        }
    }
}

impl From<EndpointError> for DirectoryError {
    fn from(e: EndpointError) -> Self {
        DirectoryError::Service {
            status: e.status_code().as_u16(),
            error: e.to_api_error(),
        }
    }
}

impl ResponseError for EndpointError {
    fn status_code(&self) -> StatusCode {
        match self {
            EndpointError::Invalid { .. } => StatusCode::BAD_REQUEST,
            EndpointError::Conflict { .. } => StatusCode::CONFLICT,
            EndpointError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_api_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_returns_400() {
        let resp = EndpointError::invalid("invalid_email", "bad email").error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_returns_409() {
        let err = EndpointError::Conflict {
            code: "duplicate_email".to_string(),
            message: "taken".to_string(),
        };
        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = EndpointError::Internal("lock poisoned".to_string());
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_error_hides_details() {
        let api = EndpointError::Internal("lock poisoned".to_string()).to_api_error();
        assert_eq!(api.message, "Internal server error");
    }

    #[test]
    fn invalid_display() {
        assert_eq!(
            EndpointError::invalid("missing_field", "firstName is required").to_string(),
            "firstName is required"
        );
    }

    #[test]
    fn endpoint_error_maps_to_service_error() {
        let err: DirectoryError = EndpointError::invalid("invalid_email", "bad email").into();
        assert_eq!(
            err,
            DirectoryError::Service {
                status: 400,
                error: ApiError::new("invalid_email", "bad email"),
            }
        );
    }
}
