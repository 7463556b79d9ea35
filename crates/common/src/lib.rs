// ============================
// crates/common/src/lib.rs
// ============================
//! Wire types shared between the Credence authentication server and its
//! API clients. Field names follow the JSON casing the public API uses.

use serde::{Deserialize, Serialize};

/// Status string returned by a successful forgot-password request.
pub const FORGOT_PASSWORD_SUCCESS: &str = "FORGOT_PASSWORD_SUCCESS";

/// Status string returned by a successful password reset.
pub const FORGOT_PASSWORD_RESET_SUCCESS: &str = "FORGOT_PASSWORD_RESET_SUCCESS";

/// Request body for `POST /auth/signUp`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    /// Account email, unique across the system
    pub email: String,
    /// Plaintext password (min 10 chars)
    pub password: String,
    /// Given name for the linked profile
    pub first_name: String,
    /// Family name for the linked profile
    pub last_name: String,
    /// Optional numeric account preference (1..=10, defaults server-side)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<u8>,
}

/// Request body for `POST /auth/login`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/verifyEmail/verify`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    pub email: String,
    /// Six-digit one-time code from the verification email
    pub code: String,
}

/// Request body for `POST /auth/verifyEmail/resend`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ResendVerificationRequest {
    pub email: String,
}

/// Request body for `POST /auth/password/forgot`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request body for `POST /auth/password/reset`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResetRequest {
    pub email: String,
    /// Replacement plaintext password (min 10 chars)
    pub password: String,
    /// Six-digit one-time code from the reset email
    pub code: String,
}

/// Session credential returned by login and verify-email
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokenResponse {
    /// Signed bearer token, valid for the configured session window
    pub access_token: String,
}

/// Profile record returned by sign-up
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Profile identifier
    pub id: String,
    /// Identifier of the owning account
    pub account_id: String,
    pub first_name: String,
    pub last_name: String,
}

/// Plain status reply used by the resend/forgot/reset endpoints
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StatusResponse {
    pub status: String,
}
