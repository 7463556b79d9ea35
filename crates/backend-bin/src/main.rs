// ============================
// crates/backend-bin/src/main.rs
// ============================
//! Binary entry point for the credence auth server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use backend_lib::config::load_settings;
use backend_lib::email::{EmailDispatch, SmtpDispatcher};
use backend_lib::http;
use backend_lib::profile::{MemProfileStore, ProfileStore};
use backend_lib::store::{CredentialStore, FileCredentialStore, FileTokenLedger, TokenLedger};
use backend_lib::AppState;

#[derive(Parser, Debug)]
#[command(name = "credence-backend", version, about = "Account authentication backend")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = load_settings(args.config.as_deref())?;

    // Initialize tracing; RUST_LOG overrides the configured level
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| settings.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Open the flat-file stores under the data directory
    let credentials = FileCredentialStore::load(settings.credentials_path())
        .await
        .context("opening credential store")?;
    let verification_tokens = FileTokenLedger::load(settings.verification_tokens_path())
        .await
        .context("opening verification token ledger")?;
    let reset_tokens = FileTokenLedger::load(settings.reset_tokens_path())
        .await
        .context("opening reset token ledger")?;

    let email = SmtpDispatcher::new(&settings.smtp, &settings.app)
        .context("building SMTP dispatcher")?;

    let bind_addr = settings.bind_addr;
    let state = AppState::new(
        settings,
        Arc::new(credentials) as Arc<dyn CredentialStore>,
        Arc::new(verification_tokens) as Arc<dyn TokenLedger>,
        Arc::new(reset_tokens) as Arc<dyn TokenLedger>,
        Arc::new(MemProfileStore::new()) as Arc<dyn ProfileStore>,
        Arc::new(email) as Arc<dyn EmailDispatch>,
    );

    let app = http::create_router(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
