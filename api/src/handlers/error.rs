//! Domain error to HTTP response mapping
//!
//! Every failure leaves the API through [`ApiError`]. Status codes and
//! messages are stable; storage and SQL detail only reaches the server log.

use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use validator::ValidationErrors;

use nyaya_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use nyaya_shared::{error_codes, ErrorResponse};

/// Which endpoint family produced the error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Surface {
    General,
    /// Evidence intake reports every storage-side failure with one message
    Upload,
}

/// A domain error on its way out of the HTTP layer
#[derive(Debug)]
pub struct ApiError {
    error: DomainError,
    surface: Surface,
}

impl ApiError {
    pub fn upload(error: DomainError) -> Self {
        Self {
            error,
            surface: Surface::Upload,
        }
    }

    fn is_upload_failure(&self) -> bool {
        self.surface == Surface::Upload
            && matches!(
                self.error,
                DomainError::Integrity { .. }
                    | DomainError::CommitUnknown { .. }
                    | DomainError::TransientStorage { .. }
                    | DomainError::Internal { .. }
            )
    }

    fn body(&self) -> ErrorResponse {
        if self.is_upload_failure() {
            return ErrorResponse::new(error_codes::UPLOAD_FAILED, "upload failed");
        }

        match &self.error {
            DomainError::Validation(ValidationError::DeclarationRequired) => ErrorResponse::new(
                error_codes::DECLARATION_REQUIRED,
                "Legal declaration required",
            ),
            DomainError::Validation(ValidationError::PayloadTooLarge { limit }) => {
                ErrorResponse::new(error_codes::PAYLOAD_TOO_LARGE, "Upload too large")
                    .add_detail("limit", limit)
            }
            DomainError::Validation(ValidationError::RequiredField { field }) => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, format!("{} is required", field))
                    .add_detail("field", field)
            }
            DomainError::Validation(ValidationError::InvalidFormat { field }) => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, format!("{} is invalid", field))
                    .add_detail("field", field)
            }
            DomainError::Validation(ValidationError::UnknownRole { .. }) => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, "Unknown role")
                    .add_detail("field", "role")
            }
            DomainError::Authentication(AuthError::MissingToken) => {
                ErrorResponse::new(error_codes::UNAUTHORIZED, "authentication required")
            }
            DomainError::Authentication(_) => {
                ErrorResponse::new(error_codes::INVALID_CREDENTIALS, "invalid credentials")
            }
            DomainError::Token(TokenError::GenerationFailed) => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "internal server error")
            }
            DomainError::Token(_) => {
                ErrorResponse::new(error_codes::TOKEN_INVALID, "invalid or expired token")
            }
            DomainError::Authorization { .. } => {
                ErrorResponse::new(error_codes::FORBIDDEN, "forbidden")
            }
            DomainError::NotFound { resource } => {
                ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource))
            }
            DomainError::Conflict { resource } => {
                ErrorResponse::new(error_codes::CONFLICT, format!("{} already exists", resource))
            }
            DomainError::TransientStorage { .. } => ErrorResponse::new(
                error_codes::SERVICE_UNAVAILABLE,
                "service temporarily unavailable",
            ),
            DomainError::Integrity { .. }
            | DomainError::CommitUnknown { .. }
            | DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "internal server error")
            }
        }
    }

    fn log(&self) {
        match &self.error {
            DomainError::Integrity { .. }
            | DomainError::CommitUnknown { .. }
            | DomainError::Internal { .. } => {
                log::error!("Request failed: {}", self.error)
            }
            DomainError::Token(TokenError::GenerationFailed) => {
                log::error!("Request failed: {}", self.error)
            }
            DomainError::Authentication(AuthError::CorruptCredential) => {
                log::error!("Stored credential could not be parsed")
            }
            DomainError::TransientStorage { .. } => log::warn!("Request failed: {}", self.error),
            _ => log::debug!("Request rejected: {}", self.error),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self {
            error,
            surface: Surface::General,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.error {
            DomainError::Validation(ValidationError::PayloadTooLarge { .. }) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Token(TokenError::GenerationFailed) => StatusCode::INTERNAL_SERVER_ERROR,
            DomainError::Authentication(_) | DomainError::Token(_) => StatusCode::UNAUTHORIZED,
            DomainError::Authorization { .. } => StatusCode::FORBIDDEN,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Conflict { .. } => StatusCode::CONFLICT,
            DomainError::TransientStorage { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DomainError::Integrity { .. }
            | DomainError::CommitUnknown { .. }
            | DomainError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.log();
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    ApiError::from(error).error_response()
}

/// Same as [`handle_domain_error`], with storage failures collapsed to `upload failed`
pub fn handle_upload_error(error: DomainError) -> HttpResponse {
    ApiError::upload(error).error_response()
}

/// Request body failed declarative validation
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let mut fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
    fields.sort_unstable();

    let body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed")
        .add_detail("fields", fields);
    HttpResponse::BadRequest().json(body)
}
