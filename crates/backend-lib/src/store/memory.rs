// ============================
// crates/backend-lib/src/store/memory.rs
// ============================
//! In-memory store implementations backed by `DashMap`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::{Credential, CredentialStore, OneTimeToken, StoreError, TokenLedger};

/// In-memory credential store, keyed by lowercased email
#[derive(Default)]
pub struct MemCredentialStore {
    records: DashMap<String, Credential>,
}

impl MemCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from previously persisted records
    pub fn from_records(records: impl IntoIterator<Item = Credential>) -> Self {
        let store = Self::new();
        for record in records {
            store.records.insert(record.email.clone(), record);
        }
        store
    }

    /// Clone out every record, in no particular order
    pub fn snapshot(&self) -> Vec<Credential> {
        self.records.iter().map(|r| r.value().clone()).collect()
    }
}

#[async_trait]
impl CredentialStore for MemCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError> {
        Ok(self.records.get(email).map(|r| r.value().clone()))
    }

    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        preference: u8,
    ) -> Result<Credential, StoreError> {
        // entry() holds the shard lock, so two racing creates cannot both win
        match self.records.entry(email.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate),
            Entry::Vacant(slot) => {
                let cred = Credential::new(email, password_hash, preference);
                slot.insert(cred.clone());
                Ok(cred)
            },
        }
    }

    async fn update_verification(
        &self,
        email: &str,
        verified: bool,
        last_login: DateTime<Utc>,
    ) -> Result<Credential, StoreError> {
        let mut record = self.records.get_mut(email).ok_or(StoreError::NotFound)?;
        record.email_verified = verified;
        record.last_login = Some(last_login);
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Credential, StoreError> {
        let mut record = self.records.get_mut(email).ok_or(StoreError::NotFound)?;
        record.password_hash = password_hash.to_string();
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}

/// In-memory one-time-token ledger, keyed by lowercased email
#[derive(Default)]
pub struct MemTokenLedger {
    records: DashMap<String, OneTimeToken>,
}

impl MemTokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from previously persisted records
    pub fn from_records(records: impl IntoIterator<Item = OneTimeToken>) -> Self {
        let ledger = Self::new();
        for record in records {
            ledger.records.insert(record.email.clone(), record);
        }
        ledger
    }

    /// Clone out every record, in no particular order
    pub fn snapshot(&self) -> Vec<OneTimeToken> {
        self.records.iter().map(|r| r.value().clone()).collect()
    }
}

#[async_trait]
impl TokenLedger for MemTokenLedger {
    async fn find(&self, email: &str) -> Result<Option<OneTimeToken>, StoreError> {
        Ok(self.records.get(email).map(|r| r.value().clone()))
    }

    async fn upsert(&self, email: &str, code: &str) -> Result<OneTimeToken, StoreError> {
        let now = Utc::now();
        let token = match self.records.entry(email.to_string()) {
            Entry::Occupied(mut slot) => {
                let row = slot.get_mut();
                row.code = code.to_string();
                row.updated_at = now;
                row.clone()
            },
            Entry::Vacant(slot) => slot
                .insert(OneTimeToken {
                    email: email.to_string(),
                    code: code.to_string(),
                    created_at: now,
                    updated_at: now,
                })
                .clone(),
        };
        Ok(token)
    }

    async fn delete(&self, email: &str) -> Result<(), StoreError> {
        self.records.remove(email);
        Ok(())
    }
}
