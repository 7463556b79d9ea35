// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod code;
pub mod engine;
pub mod password;
pub mod session;

pub use code::generate_code;
pub use engine::AuthEngine;
pub use password::{hash_password, hash_password_async, verify_password, verify_password_async};
pub use session::{SessionClaims, SessionIssuer, DEFAULT_SESSION_VALIDITY_DAYS};
