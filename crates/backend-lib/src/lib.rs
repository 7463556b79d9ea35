// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the credence auth server.

pub mod config;
pub mod store;
pub mod auth;
pub mod profile;
pub mod email;
pub mod error;
pub mod metrics;
pub mod validation;
pub mod http;

use std::sync::Arc;
use crate::auth::{AuthEngine, SessionIssuer};
use crate::config::Settings;
use crate::email::EmailDispatch;
use crate::profile::ProfileStore;
use crate::store::{CredentialStore, TokenLedger};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Auth engine driving every account operation
    pub engine: Arc<AuthEngine>,
    /// Settings manager
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        settings: Settings,
        credentials: Arc<dyn CredentialStore>,
        verification_tokens: Arc<dyn TokenLedger>,
        reset_tokens: Arc<dyn TokenLedger>,
        profiles: Arc<dyn ProfileStore>,
        email: Arc<dyn EmailDispatch>,
    ) -> Self {
        let sessions = Arc::new(SessionIssuer::new(
            &settings.session.secret,
            settings.session.validity_days,
        ));
        let engine = Arc::new(AuthEngine::new(
            credentials,
            verification_tokens,
            reset_tokens,
            sessions,
            profiles,
            email,
        ));

        Self {
            engine,
            settings: Arc::new(settings),
        }
    }
}
