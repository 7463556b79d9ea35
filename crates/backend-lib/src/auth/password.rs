// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Scrypt,
};
use zeroize::Zeroize;

/// Hash a password using scrypt
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password(plain.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

/// Verify a password against a hash.
///
/// A malformed stored hash fails closed.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}

/// Securely hash a password and zeroize the original
pub fn hash_password_secure(plain: &mut String) -> anyhow::Result<String> {
    let hash = hash_password(plain)?;
    plain.zeroize();
    Ok(hash)
}

/// Hash on the blocking pool; scrypt is deliberately slow and must not
/// stall the event loop. The plaintext is zeroized once hashed.
pub async fn hash_password_async(mut plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password_secure(&mut plain))
        .await
        .map_err(|e| anyhow::anyhow!("password hashing task failed: {e}"))?
}

/// Verify on the blocking pool. A cancelled task fails closed.
pub async fn verify_password_async(hash: String, mut plain: String) -> bool {
    tokio::task::spawn_blocking(move || {
        let ok = verify_password(&hash, &plain);
        plain.zeroize();
        ok
    })
    .await
    .unwrap_or(false)
}
