// ============================
// crates/backend-lib/src/store/mod.rs
// ============================
//! Persistence abstractions for credentials and one-time tokens.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use file::{FileCredentialStore, FileTokenLedger};
pub use memory::{MemCredentialStore, MemTokenLedger};

/// Stable opaque account identifier
pub type AccountId = Uuid;

/// Default numeric account preference for new credentials
pub const DEFAULT_PREFERENCE: u8 = 2;

/// Errors surfaced by the storage backends
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record already exists")]
    Duplicate,

    #[error("Record not found")]
    NotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A stored account credential
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Credential {
    /// Stable identifier, assigned once at creation
    pub id: AccountId,
    /// Lowercased email, unique across the store
    pub email: String,
    /// Salted password hash, never the plaintext
    pub password_hash: String,
    /// Flips true exactly once, via email verification
    pub email_verified: bool,
    /// Numeric account preference (1..=10)
    pub preference: u8,
    /// Set when verification completes
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Build a fresh, unverified credential record.
    pub fn new(email: &str, password_hash: &str, preference: u8) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            email_verified: false,
            preference,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A pending one-time code, keyed by email.
///
/// Row presence means the action (verification or reset) is pending; the row
/// is deleted when the code is consumed.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OneTimeToken {
    pub email: String,
    /// Six-digit zero-padded code
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Trait for credential storage backends
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a credential by its (already lowercased) email
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError>;

    /// Create a credential; fails with [`StoreError::Duplicate`] when the
    /// email is already taken
    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        preference: u8,
    ) -> Result<Credential, StoreError>;

    /// Set the verified flag and last-login timestamp
    async fn update_verification(
        &self,
        email: &str,
        verified: bool,
        last_login: DateTime<Utc>,
    ) -> Result<Credential, StoreError>;

    /// Replace the stored password hash
    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Credential, StoreError>;
}

/// Trait for one-time token ledgers.
///
/// The email-verification ledger and the password-reset ledger are two
/// independent instances of this trait.
#[async_trait]
pub trait TokenLedger: Send + Sync {
    /// Look up the pending token for an email
    async fn find(&self, email: &str) -> Result<Option<OneTimeToken>, StoreError>;

    /// Create or replace the pending token for an email; at most one row per
    /// email ever exists, last writer wins
    async fn upsert(&self, email: &str, code: &str) -> Result<OneTimeToken, StoreError>;

    /// Remove the pending token; removing an absent row is a no-op
    async fn delete(&self, email: &str) -> Result<(), StoreError>;
}
