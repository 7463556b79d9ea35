// ============================
// crates/backend-lib/src/store/file.rs
// ============================
//! File-backed store implementations.
//!
//! Each store wraps its in-memory counterpart and writes a JSON snapshot
//! after every mutation, so a restart picks up where the process left off.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs as tokio_fs;
use tokio::sync::Mutex;

use super::memory::{MemCredentialStore, MemTokenLedger};
use super::{Credential, CredentialStore, OneTimeToken, StoreError, TokenLedger};

/// Credential store persisted as a JSON snapshot file
pub struct FileCredentialStore {
    inner: MemCredentialStore,
    path: PathBuf,
    // serializes mutate-and-persist sections so snapshots stay consistent
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Open the store, loading any existing snapshot at `path`.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            tokio_fs::create_dir_all(parent).await?;
        }

        let inner = if path.exists() {
            let content = tokio_fs::read_to_string(&path).await?;
            let records: Vec<Credential> = serde_json::from_str(&content)?;
            MemCredentialStore::from_records(records)
        } else {
            MemCredentialStore::new()
        };

        Ok(Self {
            inner,
            path,
            write_lock: Mutex::new(()),
        })
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.inner.snapshot())?;
        tokio_fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError> {
        self.inner.find_by_email(email).await
    }

    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        preference: u8,
    ) -> Result<Credential, StoreError> {
        let _guard = self.write_lock.lock().await;
        let cred = self.inner.create(email, password_hash, preference).await?;
        self.persist().await?;
        Ok(cred)
    }

    async fn update_verification(
        &self,
        email: &str,
        verified: bool,
        last_login: DateTime<Utc>,
    ) -> Result<Credential, StoreError> {
        let _guard = self.write_lock.lock().await;
        let cred = self
            .inner
            .update_verification(email, verified, last_login)
            .await?;
        self.persist().await?;
        Ok(cred)
    }

    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Credential, StoreError> {
        let _guard = self.write_lock.lock().await;
        let cred = self.inner.update_password(email, password_hash).await?;
        self.persist().await?;
        Ok(cred)
    }
}

/// One-time-token ledger persisted as a JSON snapshot file
pub struct FileTokenLedger {
    inner: MemTokenLedger,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTokenLedger {
    /// Open the ledger, loading any existing snapshot at `path`.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            tokio_fs::create_dir_all(parent).await?;
        }

        let inner = if path.exists() {
            let content = tokio_fs::read_to_string(&path).await?;
            let records: Vec<OneTimeToken> = serde_json::from_str(&content)?;
            MemTokenLedger::from_records(records)
        } else {
            MemTokenLedger::new()
        };

        Ok(Self {
            inner,
            path,
            write_lock: Mutex::new(()),
        })
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.inner.snapshot())?;
        tokio_fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenLedger for FileTokenLedger {
    async fn find(&self, email: &str) -> Result<Option<OneTimeToken>, StoreError> {
        self.inner.find(email).await
    }

    async fn upsert(&self, email: &str, code: &str) -> Result<OneTimeToken, StoreError> {
        let _guard = self.write_lock.lock().await;
        let token = self.inner.upsert(email, code).await?;
        self.persist().await?;
        Ok(token)
    }

    async fn delete(&self, email: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.inner.delete(email).await?;
        self.persist().await?;
        Ok(())
    }
}
