// crates/backend-lib/tests/common/mod.rs
//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use backend_lib::config::Settings;
use backend_lib::email::{DispatchStatus, EmailDispatch};
use backend_lib::profile::{MemProfileStore, ProfileStore};
use backend_lib::store::{CredentialStore, MemCredentialStore, MemTokenLedger, TokenLedger};
use backend_lib::AppState;

/// Email double that records every dispatch instead of sending it.
pub struct RecordingEmail {
    fail: AtomicBool,
    sent: Mutex<Vec<(String, HashMap<String, String>)>>,
}

impl RecordingEmail {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<(String, HashMap<String, String>)> {
        self.sent.lock().await.clone()
    }

    /// The `token` value of the most recent dispatch, if any
    pub async fn last_code(&self) -> Option<String> {
        self.sent
            .lock()
            .await
            .last()
            .and_then(|(_, data)| data.get("token").cloned())
    }
}

#[async_trait]
impl EmailDispatch for RecordingEmail {
    async fn send(&self, template_key: &str, data: HashMap<String, String>) -> DispatchStatus {
        self.sent.lock().await.push((template_key.to_string(), data));
        if self.fail.load(Ordering::SeqCst) {
            DispatchStatus::Failed
        } else {
            DispatchStatus::Sent
        }
    }
}

/// A fully wired in-memory backend with inspectable collaborators.
pub struct TestBackend {
    pub state: AppState,
    pub credentials: Arc<MemCredentialStore>,
    pub verification_tokens: Arc<MemTokenLedger>,
    pub reset_tokens: Arc<MemTokenLedger>,
    pub profiles: Arc<MemProfileStore>,
    pub email: Arc<RecordingEmail>,
}

pub fn backend() -> TestBackend {
    let mut settings = Settings::default();
    settings.session.secret = "integration-test-secret".to_string();

    let credentials = Arc::new(MemCredentialStore::new());
    let verification_tokens = Arc::new(MemTokenLedger::new());
    let reset_tokens = Arc::new(MemTokenLedger::new());
    let profiles = Arc::new(MemProfileStore::new());
    let email = Arc::new(RecordingEmail::new());

    let state = AppState::new(
        settings,
        Arc::clone(&credentials) as Arc<dyn CredentialStore>,
        Arc::clone(&verification_tokens) as Arc<dyn TokenLedger>,
        Arc::clone(&reset_tokens) as Arc<dyn TokenLedger>,
        Arc::clone(&profiles) as Arc<dyn ProfileStore>,
        Arc::clone(&email) as Arc<dyn EmailDispatch>,
    );

    TestBackend {
        state,
        credentials,
        verification_tokens,
        reset_tokens,
        profiles,
        email,
    }
}
