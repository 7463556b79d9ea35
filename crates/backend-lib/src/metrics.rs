// ============================
// crates/backend-lib/src/metrics.rs
// ============================
//! Central place for metric keys
pub const SIGNUP_CREATED: &str = "auth.signup.created";
pub const SIGNUP_REJECTED: &str = "auth.signup.rejected";
pub const LOGIN_SUCCESS: &str = "auth.login.success";
pub const LOGIN_FAILED: &str = "auth.login.failed";
pub const EMAIL_VERIFIED: &str = "auth.email.verified";
pub const VERIFICATION_RESENT: &str = "auth.email.resend";
pub const PASSWORD_FORGOT: &str = "auth.password.forgot";
pub const PASSWORD_RESET: &str = "auth.password.reset";
pub const EMAIL_DISPATCHED: &str = "email.dispatched";
pub const EMAIL_DISPATCH_FAILED: &str = "email.dispatch_failed";
