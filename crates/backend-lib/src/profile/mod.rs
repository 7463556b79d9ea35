// ============================
// crates/backend-lib/src/profile/mod.rs
// ============================
//! User-profile collaborator.
//!
//! The auth engine only creates profiles at sign-up and reads display names
//! for outbound email; everything else about profiles belongs to the caller
//! embedding this library.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::store::AccountId;

/// Profile identifier
pub type ProfileId = Uuid;

/// Errors surfaced by profile stores
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Profile not found")]
    NotFound,
}

/// A name record linked to an account
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Profile {
    pub id: ProfileId,
    /// Owning account
    pub account_id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Display name used in outbound email
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Trait for profile storage backends
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Create the profile linked to a freshly created account
    async fn create(
        &self,
        account_id: AccountId,
        first_name: &str,
        last_name: &str,
    ) -> Result<Profile, ProfileError>;

    /// Look up the profile owned by an account
    async fn find_by_account(&self, account_id: AccountId)
        -> Result<Option<Profile>, ProfileError>;

    /// Display name for an account
    async fn full_name(&self, account_id: AccountId) -> Result<String, ProfileError> {
        self.find_by_account(account_id)
            .await?
            .map(|p| p.full_name())
            .ok_or(ProfileError::NotFound)
    }
}

/// In-process profile store, keyed by account id
#[derive(Default)]
pub struct MemProfileStore {
    records: DashMap<AccountId, Profile>,
}

impl MemProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemProfileStore {
    async fn create(
        &self,
        account_id: AccountId,
        first_name: &str,
        last_name: &str,
    ) -> Result<Profile, ProfileError> {
        let now = Utc::now();
        let profile = Profile {
            id: Uuid::new_v4(),
            account_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.records.insert(account_id, profile.clone());
        Ok(profile)
    }

    async fn find_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Option<Profile>, ProfileError> {
        Ok(self.records.get(&account_id).map(|p| p.value().clone()))
    }
}
