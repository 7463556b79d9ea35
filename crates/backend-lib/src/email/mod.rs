// ============================
// crates/backend-lib/src/email/mod.rs
// ============================
//! Email dispatch collaborator.
//!
//! Dispatchers take a template key plus substitution data (the recipient
//! rides along under the `email` key) and report the outcome as a status.
//! A failed send is a status, never an `Err`; each auth flow decides for
//! itself how hard to react.

pub mod smtp;
pub mod templates;

use async_trait::async_trait;
use std::collections::HashMap;

pub use smtp::SmtpDispatcher;
pub use templates::{EmailTemplate, TemplateCatalog};

/// Template key for the initial verification-code email
pub const TEMPLATE_VERIFY_CREATED: &str = "emailverify-token-created";
/// Template key for the password-reset-code email
pub const TEMPLATE_RESET_CREATED: &str = "reset-token-created";
/// Template key for the reset-confirmation email
pub const TEMPLATE_RESET_DONE: &str = "password-reset-successful";

/// Outcome of a dispatch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    Sent,
    Failed,
}

impl DispatchStatus {
    pub fn is_sent(self) -> bool {
        matches!(self, DispatchStatus::Sent)
    }

    /// Wire status string, as the resend endpoint reports it
    pub fn as_status_str(self) -> &'static str {
        match self {
            DispatchStatus::Sent => "success",
            DispatchStatus::Failed => "error",
        }
    }
}

/// Trait for email dispatch backends
#[async_trait]
pub trait EmailDispatch: Send + Sync {
    /// Render the keyed template with `data` and send it to `data["email"]`
    async fn send(&self, template_key: &str, data: HashMap<String, String>) -> DispatchStatus;
}
