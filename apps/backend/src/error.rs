use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

/// Wire shape for every error response: `{"error": "<message>"}`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// No bearer token was supplied with a protected request.
    #[error("Access token required")]
    MissingToken,
    /// The presented token is not a well-formed signed token.
    #[error("TokenMalformed")]
    TokenMalformed,
    /// The token signature does not verify against the configured secret.
    #[error("TokenSignatureInvalid")]
    TokenSignatureInvalid,
    /// The token is past its expiration instant.
    #[error("TokenExpired")]
    TokenExpired,
    #[error("Unauthorized: {detail}")]
    Unauthorized { detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { detail: String },
    #[error("Not found: {detail}")]
    NotFound { detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable")]
    DbUnavailable,
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::TokenMalformed => StatusCode::FORBIDDEN,
            AppError::TokenSignatureInvalid => StatusCode::FORBIDDEN,
            AppError::TokenExpired => StatusCode::FORBIDDEN,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. The three token-rejection variants stay
    /// distinguishable in logs and tests but share one outward message.
    fn message(&self) -> String {
        match self {
            AppError::MissingToken => "Access token required".to_string(),
            AppError::TokenMalformed
            | AppError::TokenSignatureInvalid
            | AppError::TokenExpired => "Invalid token".to_string(),
            AppError::Unauthorized { detail } => detail.clone(),
            AppError::BadRequest { detail } => detail.clone(),
            AppError::NotFound { detail } => detail.clone(),
            AppError::Db { .. } | AppError::DbUnavailable => {
                "Internal server error".to_string()
            }
            AppError::Internal { .. } | AppError::Config { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::Unauthorized {
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::Db {
            detail: e.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        HttpResponse::build(status).json(ErrorBody {
            error: self.message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_rejections_share_one_outward_message() {
        for err in [
            AppError::TokenMalformed,
            AppError::TokenSignatureInvalid,
            AppError::TokenExpired,
        ] {
            assert_eq!(err.status(), StatusCode::FORBIDDEN);
            assert_eq!(err.message(), "Invalid token");
        }
    }

    #[test]
    fn missing_token_is_401() {
        let err = AppError::MissingToken;
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Access token required");
    }

    #[test]
    fn internal_errors_do_not_leak_detail() {
        let err = AppError::internal("secret detail".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Internal server error");
    }
}
