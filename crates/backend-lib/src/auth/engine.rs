// ============================
// crates/backend-lib/src/auth/engine.rs
// ============================
//! The auth engine: signup, login, verification, and reset flows.
//!
//! Every collaborator is injected through the constructor; the engine owns
//! no persistence of its own. Inbound emails are lowercased before any
//! lookup or write, whatever the transport did.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use metrics::counter;
use tracing::{info, warn};

use credence_common::{FORGOT_PASSWORD_RESET_SUCCESS, FORGOT_PASSWORD_SUCCESS};

use crate::email::{
    DispatchStatus, EmailDispatch, TEMPLATE_RESET_CREATED, TEMPLATE_RESET_DONE,
    TEMPLATE_VERIFY_CREATED,
};
use crate::error::AuthError;
use crate::metrics::{
    EMAIL_VERIFIED, LOGIN_FAILED, LOGIN_SUCCESS, PASSWORD_FORGOT, PASSWORD_RESET,
    SIGNUP_CREATED, SIGNUP_REJECTED, VERIFICATION_RESENT,
};
use crate::profile::{Profile, ProfileStore};
use crate::store::{CredentialStore, StoreError, TokenLedger, DEFAULT_PREFERENCE};
use crate::validation::normalize_email;

use super::code::generate_code;
use super::password::{hash_password_async, verify_password_async};
use super::session::SessionIssuer;

/// Orchestrates the credential and token lifecycle.
pub struct AuthEngine {
    credentials: Arc<dyn CredentialStore>,
    verification_tokens: Arc<dyn TokenLedger>,
    reset_tokens: Arc<dyn TokenLedger>,
    sessions: Arc<SessionIssuer>,
    profiles: Arc<dyn ProfileStore>,
    email: Arc<dyn EmailDispatch>,
}

impl AuthEngine {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        verification_tokens: Arc<dyn TokenLedger>,
        reset_tokens: Arc<dyn TokenLedger>,
        sessions: Arc<SessionIssuer>,
        profiles: Arc<dyn ProfileStore>,
        email: Arc<dyn EmailDispatch>,
    ) -> Self {
        Self {
            credentials,
            verification_tokens,
            reset_tokens,
            sessions,
            profiles,
            email,
        }
    }

    /// Create an account, its profile, and a pending verification code.
    ///
    /// A failed verification email fails the whole call even though the
    /// credential and profile already exist; the account is then stuck
    /// unverified until a resend succeeds. That partial state is the
    /// designed recovery path, not a rollback candidate.
    pub async fn sign_up(
        &self,
        email: &str,
        password: String,
        first_name: &str,
        last_name: &str,
        preference: Option<u8>,
    ) -> Result<Profile, AuthError> {
        let email = normalize_email(email);
        let preference = preference.unwrap_or(DEFAULT_PREFERENCE);

        let password_hash = hash_password_async(password).await?;

        let credential = match self
            .credentials
            .create(&email, &password_hash, preference)
            .await
        {
            Ok(credential) => credential,
            Err(StoreError::Duplicate) => {
                counter!(SIGNUP_REJECTED).increment(1);
                return Err(AuthError::DuplicateAccount);
            },
            Err(e) => return Err(e.into()),
        };

        let profile = self
            .profiles
            .create(credential.id, first_name, last_name)
            .await?;

        let code = generate_code();
        self.verification_tokens.upsert(&email, &code).await?;

        let name = self.profiles.full_name(credential.id).await?;
        let status = self
            .email
            .send(TEMPLATE_VERIFY_CREATED, dispatch_data(&email, &name, Some(&code)))
            .await;

        if !status.is_sent() {
            warn!(account_id = %credential.id, "verification email failed at signup");
            return Err(AuthError::EmailDispatchFailed);
        }

        counter!(SIGNUP_CREATED).increment(1);
        info!(account_id = %credential.id, "account created, verification pending");
        Ok(profile)
    }

    /// Exchange credentials for a session token.
    ///
    /// A missing account and a wrong password are indistinguishable to the
    /// caller. An unverified account is told so and gets no session.
    pub async fn login(&self, email: &str, password: String) -> Result<String, AuthError> {
        let email = normalize_email(email);

        let Some(credential) = self.credentials.find_by_email(&email).await? else {
            counter!(LOGIN_FAILED).increment(1);
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password_async(credential.password_hash.clone(), password).await {
            counter!(LOGIN_FAILED).increment(1);
            return Err(AuthError::InvalidCredentials);
        }

        if !credential.email_verified {
            counter!(LOGIN_FAILED).increment(1);
            return Err(AuthError::EmailNotVerified);
        }

        let token = self.sessions.issue(credential.id, &credential.email)?;
        counter!(LOGIN_SUCCESS).increment(1);
        Ok(token)
    }

    /// Consume a verification code and return a session token.
    ///
    /// "No pending code" and "wrong code" collapse into one error so the
    /// caller learns nothing about ledger state. Success is only reported
    /// after both the credential update and the token deletion applied.
    pub async fn verify_email(&self, email: &str, code: &str) -> Result<String, AuthError> {
        let email = normalize_email(email);

        if let Some(credential) = self.credentials.find_by_email(&email).await? {
            if credential.email_verified {
                return Err(AuthError::AlreadyVerified);
            }
        }

        match self.verification_tokens.find(&email).await? {
            Some(token) if token.code == code => {},
            _ => return Err(AuthError::VerificationFailed),
        }

        let credential = self
            .credentials
            .update_verification(&email, true, Utc::now())
            .await
            .map_err(|e| match e {
                // a code with no account behind it is just a failed verification
                StoreError::NotFound => AuthError::VerificationFailed,
                other => other.into(),
            })?;

        self.verification_tokens.delete(&email).await?;

        let token = self.sessions.issue(credential.id, &credential.email)?;
        counter!(EMAIL_VERIFIED).increment(1);
        info!(account_id = %credential.id, "email verified");
        Ok(token)
    }

    /// Replace any pending verification code and send it again.
    ///
    /// The dispatch outcome is the return value here, not an error.
    pub async fn resend_verification(&self, email: &str) -> Result<DispatchStatus, AuthError> {
        let email = normalize_email(email);

        let credential = self
            .credentials
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if credential.email_verified {
            return Err(AuthError::AlreadyVerified);
        }

        let code = generate_code();
        self.verification_tokens.upsert(&email, &code).await?;

        let name = self.profiles.full_name(credential.id).await?;
        let status = self
            .email
            .send(TEMPLATE_VERIFY_CREATED, dispatch_data(&email, &name, Some(&code)))
            .await;

        counter!(VERIFICATION_RESENT).increment(1);
        Ok(status)
    }

    /// Start a password reset.
    ///
    /// An unknown email gets the same success reply with no side effects,
    /// so callers cannot probe for accounts. The reset email itself is
    /// fire-and-forget: its failure never reaches the caller.
    pub async fn forgot_password(&self, email: &str) -> Result<&'static str, AuthError> {
        let email = normalize_email(email);

        let Some(credential) = self.credentials.find_by_email(&email).await? else {
            return Ok(FORGOT_PASSWORD_SUCCESS);
        };

        let code = generate_code();
        self.reset_tokens.upsert(&email, &code).await?;

        match self.profiles.full_name(credential.id).await {
            Ok(name) => {
                let status = self
                    .email
                    .send(TEMPLATE_RESET_CREATED, dispatch_data(&email, &name, Some(&code)))
                    .await;
                if !status.is_sent() {
                    warn!(account_id = %credential.id, "reset code email failed to send");
                }
            },
            Err(_) => {
                warn!(account_id = %credential.id, "no profile found, reset email skipped");
            },
        }

        counter!(PASSWORD_FORGOT).increment(1);
        Ok(FORGOT_PASSWORD_SUCCESS)
    }

    /// Consume a reset code and install a new password.
    ///
    /// The confirmation email is fire-and-forget; the token is deleted and
    /// success reported regardless of it.
    pub async fn forgot_password_reset(
        &self,
        email: &str,
        password: String,
        code: &str,
    ) -> Result<&'static str, AuthError> {
        let email = normalize_email(email);

        let token = self
            .reset_tokens
            .find(&email)
            .await?
            .ok_or(AuthError::ResetTokenNotFound)?;

        if token.code != code {
            return Err(AuthError::ResetCodeMismatch);
        }

        let password_hash = hash_password_async(password).await?;
        let credential = self
            .credentials
            .update_password(&email, &password_hash)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => AuthError::AccountNotFound,
                other => other.into(),
            })?;

        match self.profiles.full_name(credential.id).await {
            Ok(name) => {
                let status = self
                    .email
                    .send(TEMPLATE_RESET_DONE, dispatch_data(&email, &name, None))
                    .await;
                if !status.is_sent() {
                    warn!(account_id = %credential.id, "reset confirmation email failed to send");
                }
            },
            Err(_) => {
                warn!(account_id = %credential.id, "no profile found, confirmation email skipped");
            },
        }

        self.reset_tokens.delete(&email).await?;

        counter!(PASSWORD_RESET).increment(1);
        info!(account_id = %credential.id, "password reset");
        Ok(FORGOT_PASSWORD_RESET_SUCCESS)
    }
}

/// Substitution data for outbound mail; the recipient rides along as `email`
fn dispatch_data(email: &str, name: &str, token: Option<&str>) -> HashMap<String, String> {
    let mut data = HashMap::from([
        ("email".to_string(), email.to_string()),
        ("name".to_string(), name.to_string()),
    ]);
    if let Some(token) = token {
        data.insert("token".to_string(), token.to_string());
    }
    data
}
