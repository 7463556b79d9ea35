// ============================
// crates/backend-lib/src/error.rs
// ============================
//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;
use crate::validation::ValidationError;

/// Authentication error types with error codes and context
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Account already exists")]
    DuplicateAccount,

    #[error("Email dispatch failed")]
    EmailDispatchFailed,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email not verified")]
    EmailNotVerified,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Email already verified")]
    AlreadyVerified,

    #[error("Email verification failed")]
    VerificationFailed,

    #[error("Password reset token not found")]
    ResetTokenNotFound,

    #[error("Password reset code mismatch")]
    ResetCodeMismatch,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Session token error: {0}")]
    Session(#[from] jsonwebtoken::errors::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::DuplicateAccount
            | AuthError::EmailNotVerified
            | AuthError::VerificationFailed
            | AuthError::ResetCodeMismatch => StatusCode::FORBIDDEN,
            AuthError::AccountNotFound
            | AuthError::ResetTokenNotFound
            | AuthError::ProfileNotFound => StatusCode::NOT_FOUND,
            AuthError::AlreadyVerified => StatusCode::CONFLICT,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::EmailDispatchFailed
            | AuthError::Store(_)
            | AuthError::Session(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::DuplicateAccount => "ACCT_001",
            AuthError::AccountNotFound => "ACCT_002",
            AuthError::InvalidCredentials => "AUTH_001",
            AuthError::EmailNotVerified => "AUTH_002",
            AuthError::AlreadyVerified => "VERIFY_001",
            AuthError::VerificationFailed => "VERIFY_002",
            AuthError::ResetTokenNotFound => "RESET_001",
            AuthError::ResetCodeMismatch => "RESET_002",
            AuthError::EmailDispatchFailed => "MAIL_001",
            AuthError::ProfileNotFound => "PROF_001",
            AuthError::Validation(_) => "VAL_001",
            AuthError::Store(_) => "STORE_001",
            AuthError::Session(_) => "SESSION_001",
            AuthError::Internal(_) => "INT_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AuthError::DuplicateAccount => {
                "An account with this email already exists".to_string()
            },
            AuthError::EmailDispatchFailed => "Could not send email".to_string(),
            AuthError::InvalidCredentials => "Invalid email or password".to_string(),
            AuthError::EmailNotVerified => "Email address not verified".to_string(),
            AuthError::AccountNotFound => "Account not found".to_string(),
            AuthError::AlreadyVerified => "Email address already verified".to_string(),
            AuthError::VerificationFailed => "Email verification failed".to_string(),
            AuthError::ResetTokenNotFound => {
                "No password reset in progress for this email".to_string()
            },
            AuthError::ResetCodeMismatch => {
                "Password reset code does not match".to_string()
            },
            AuthError::ProfileNotFound => "Profile not found".to_string(),
            // field-level validation messages carry no secrets
            AuthError::Validation(e) => e.to_string(),
            AuthError::Store(_) | AuthError::Session(_) | AuthError::Internal(_) => {
                "An internal server error occurred".to_string()
            },
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<crate::profile::ProfileError> for AuthError {
    fn from(err: crate::profile::ProfileError) -> Self {
        match err {
            crate::profile::ProfileError::NotFound => AuthError::ProfileNotFound,
        }
    }
}
