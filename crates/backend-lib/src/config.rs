// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
//!
//! Settings merge a TOML file with `CREDENCE_`-prefixed environment
//! variables; nested sections use `__` in the variable name, e.g.
//! `CREDENCE_SESSION__SECRET` sets `session.secret`.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Data directory for the file-backed stores
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log filter, e.g. "info" or "backend_lib=debug"
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Session signing settings
    #[serde(default)]
    pub session: SessionSettings,
    /// Outbound mail settings
    #[serde(default)]
    pub smtp: SmtpSettings,
    /// Identity injected into outbound email
    #[serde(default)]
    pub app: AppSettings,
}

/// Session signing settings
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// HMAC secret for session credentials; must be set before serving
    #[serde(default)]
    pub secret: String,
    /// Validity window in days
    #[serde(default = "default_validity_days")]
    pub validity_days: i64,
}

/// Outbound mail settings
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpSettings {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// From header, e.g. `Credence <no-reply@credence.example>`
    #[serde(default = "default_from_address")]
    pub from_address: String,
}

/// Application identity injected into outbound email
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_app_url")]
    pub url: String,
}

fn default_bind_addr() -> SocketAddr {
    "127.0.0.1:3000".parse().unwrap()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_validity_days() -> i64 {
    crate::auth::session::DEFAULT_SESSION_VALIDITY_DAYS
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "no-reply@localhost".to_string()
}

fn default_app_name() -> String {
    "Credence".to_string()
}

fn default_app_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            session: SessionSettings::default(),
            smtp: SmtpSettings::default(),
            app: AppSettings::default(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            secret: String::new(),
            validity_days: default_validity_days(),
        }
    }
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from_address: default_from_address(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            url: default_app_url(),
        }
    }
}

impl Settings {
    /// Check the loaded settings are usable before serving
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.session.secret.is_empty(),
            "session.secret must be set"
        );
        anyhow::ensure!(
            self.session.validity_days > 0,
            "session.validity_days must be positive"
        );
        anyhow::ensure!(!self.smtp.host.is_empty(), "smtp.host must be set");
        anyhow::ensure!(
            !self.smtp.from_address.is_empty(),
            "smtp.from_address must be set"
        );
        anyhow::ensure!(!self.app.name.is_empty(), "app.name must be set");
        Ok(())
    }

    /// Snapshot file for the credential store
    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir.join("credentials.json")
    }

    /// Snapshot file for the email-verification ledger
    pub fn verification_tokens_path(&self) -> PathBuf {
        self.data_dir.join("email-verification.json")
    }

    /// Snapshot file for the password-reset ledger
    pub fn reset_tokens_path(&self) -> PathBuf {
        self.data_dir.join("password-reset.json")
    }
}

/// Load settings from a TOML file (if present) and the environment
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let toml_path = config_path.unwrap_or_else(|| Path::new("credence.toml"));

    let settings: Settings = Figment::new()
        .merge(Toml::file(toml_path))
        .merge(Env::prefixed("CREDENCE_").split("__"))
        .extract()?;

    settings.validate()?;
    Ok(settings)
}
