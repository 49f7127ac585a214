//! HTTP error response mapping.
//!
//! Every failure leaves the API as `{"error": {"message": ..., "status": ...}}`
//! with the same status on the response line.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use biztime_domain::error::BizTimeError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    message: String,
    status: u16,
}

/// Maps [`BizTimeError`] and request rejections to an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    /// A service or repository failed.
    Domain(BizTimeError),
    /// The request body was missing or not the expected JSON.
    Json(JsonRejection),
    /// A path segment could not be decoded.
    Path(PathRejection),
    /// No route matched the request path.
    RouteNotFound,
    /// The path exists but does not accept the request method.
    MethodNotAllowed,
}

impl From<BizTimeError> for ApiError {
    fn from(err: BizTimeError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Json(rejection)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Path(rejection)
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Domain(BizTimeError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(BizTimeError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Domain(err @ BizTimeError::Storage(_)) => {
                tracing::error!(error = ?err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::Json(rejection) => (rejection.status(), rejection.body_text()),
            Self::Path(rejection) => (rejection.status(), rejection.body_text()),
            Self::RouteNotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "method not allowed".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = ErrorBody {
            error: ErrorDetail {
                message,
                status: status.as_u16(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biztime_domain::error::{NotFoundError, ValidationError};

    #[test]
    fn should_map_validation_to_bad_request() {
        let err = ApiError::from(BizTimeError::from(ValidationError::InvalidAmount));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "amount must be a positive number");
    }

    #[test]
    fn should_map_not_found_to_404_with_message() {
        let err = ApiError::from(BizTimeError::from(NotFoundError {
            entity: "company",
            key: "code",
            value: "ghost".to_string(),
        }));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "can't find company with code of ghost");
    }

    #[test]
    fn should_hide_storage_details_behind_generic_500() {
        let source = std::io::Error::other("disk on fire");
        let err = ApiError::from(BizTimeError::Storage(Box::new(source)));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "internal server error");
    }

    #[test]
    fn should_map_method_not_allowed_to_405() {
        let (status, message) = ApiError::MethodNotAllowed.status_and_message();
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(message, "method not allowed");
    }

    #[test]
    fn should_mirror_status_in_response_line() {
        let response = ApiError::RouteNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
