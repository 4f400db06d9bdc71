use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use utoipa::ToSchema;
use std::fmt;

use crate::constants::{CODE_INTERNAL_ERROR, ERR_VALIDATION_FAILED};

/// Error response structure
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Whether the request was successful (always false for errors)
    #[schema(example = false)]
    pub success: bool,
    /// Machine-readable error code
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    /// Error message
    #[schema(example = "Not found.")]
    pub message: String,
    /// Detailed validation errors (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    InternalServerError { code: String, message: String },
    ValidationError { code: String, errors: Vec<String> },
}

impl ApiError {
    pub fn bad_request(code: &str, message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(code: &str, message: impl Into<String>) -> Self {
        ApiError::NotFound {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn conflict(code: &str, message: impl Into<String>) -> Self {
        ApiError::Conflict {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::InternalServerError {
            code: CODE_INTERNAL_ERROR.to_string(),
            message: message.into(),
        }
    }

    pub fn validation(code: &str, errors: Vec<String>) -> Self {
        ApiError::ValidationError {
            code: code.to_string(),
            errors,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::BadRequest { code, message }
            | ApiError::NotFound { code, message }
            | ApiError::Conflict { code, message }
            | ApiError::InternalServerError { code, message } => ErrorResponse {
                success: false,
                code: code.clone(),
                message: message.clone(),
                errors: None,
            },
            ApiError::ValidationError { code, errors } => ErrorResponse {
                success: false,
                code: code.clone(),
                message: ERR_VALIDATION_FAILED.to_string(),
                errors: Some(errors.clone()),
            },
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest { code, message } => {
                write!(f, "Bad Request [{}]: {}", code, message)
            }
            ApiError::NotFound { code, message } => {
                write!(f, "Not Found [{}]: {}", code, message)
            }
            ApiError::Conflict { code, message } => {
                write!(f, "Conflict [{}]: {}", code, message)
            }
            ApiError::InternalServerError { code, message } => {
                write!(f, "Internal Server Error [{}]: {}", code, message)
            }
            ApiError::ValidationError { code, errors } => {
                write!(f, "Validation Error [{}]: {:?}", code, errors)
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } | ApiError::ValidationError { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        ApiError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::constants::{CODE_NOT_FOUND, CODE_VALIDATION_FAILED};

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::not_found(CODE_NOT_FOUND, "gone").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::validation(CODE_VALIDATION_FAILED, vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_body_lists_errors() {
        let body = ApiError::validation(CODE_VALIDATION_FAILED, vec!["name: required".into()]).body();
        assert!(!body.success);
        assert_eq!(body.message, ERR_VALIDATION_FAILED);
        assert_eq!(body.errors, Some(vec!["name: required".to_string()]));
    }
}
