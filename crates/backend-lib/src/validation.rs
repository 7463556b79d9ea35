// ============================
// crates/backend-lib/src/validation.rs
// ============================
//! Request field validation.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// Common validation constants
pub const MIN_PASSWORD_LENGTH: usize = 10;
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit
pub const MAX_NAME_LENGTH: usize = 100;
pub const CODE_LENGTH: usize = 6;
pub const MIN_PREFERENCE: u8 = 1;
pub const MAX_PREFERENCE: u8 = 10;

// Regex patterns for validation
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());
static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{6}$").unwrap());
static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^<>/\\{}()\[\];]*$").unwrap());

/// Possible validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid code: {0}")]
    InvalidCode(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid preference: {0}")]
    InvalidPreference(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Lowercase an email address the way every lookup key is stored.
pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "Email address cannot be empty".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "Email address cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(
            "Invalid email address format".to_string(),
        ));
    }

    Ok(email)
}

/// Validate a password
pub fn validate_password(password: &str) -> ValidationResult<&str> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "Password cannot exceed {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(password)
}

/// Validate a one-time code (six decimal digits, zero-padded)
pub fn validate_code(code: &str) -> ValidationResult<&str> {
    if code.len() != CODE_LENGTH {
        return Err(ValidationError::InvalidCode(format!(
            "Code must be exactly {CODE_LENGTH} digits"
        )));
    }

    if !CODE_REGEX.is_match(code) {
        return Err(ValidationError::InvalidCode(
            "Code must contain only digits".to_string(),
        ));
    }

    Ok(code)
}

/// Validate a profile name component
pub fn validate_name(name: &str) -> ValidationResult<&str> {
    if name.is_empty() {
        return Err(ValidationError::InvalidName(
            "Name must not be empty".to_string(),
        ));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::InvalidName(format!(
            "Name must be between 1 and {MAX_NAME_LENGTH} characters"
        )));
    }

    // Check for potentially dangerous characters
    if !NAME_REGEX.is_match(name) {
        return Err(ValidationError::InvalidName(
            "Name contains invalid characters".to_string(),
        ));
    }

    Ok(name)
}

/// Validate the numeric account preference
pub fn validate_preference(preference: u8) -> ValidationResult<u8> {
    if !(MIN_PREFERENCE..=MAX_PREFERENCE).contains(&preference) {
        return Err(ValidationError::InvalidPreference(format!(
            "Preference must be between {MIN_PREFERENCE} and {MAX_PREFERENCE}"
        )));
    }

    Ok(preference)
}
