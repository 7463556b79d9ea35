// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! Session credential issuance and verification.
//!
//! Sessions are stateless signed tokens; nothing is stored server-side and
//! there is no revocation list. A token is valid until its expiry.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::store::AccountId;

/// Default session validity window, in days
pub const DEFAULT_SESSION_VALIDITY_DAYS: i64 = 90;

/// Claims carried by a session credential
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionClaims {
    /// Account identifier
    pub sub: String,
    /// Lowercased account email
    pub email: String,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

/// Issues and verifies HS256-signed session credentials
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity: Duration,
}

impl SessionIssuer {
    pub fn new(secret: &str, validity_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validity: Duration::days(validity_days),
        }
    }

    /// Sign a session credential for a verified account
    pub fn issue(
        &self,
        account_id: AccountId,
        email: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: account_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.validity).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Verify a session credential and return its claims.
    ///
    /// Rejects bad signatures and expired tokens.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let data = decode::<SessionClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}
