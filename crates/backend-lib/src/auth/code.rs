// ============================
// crates/backend-lib/src/auth/code.rs
// ============================
/** One-time code generation for email verification and password reset.

Codes are six zero-padded decimal digits drawn from OS-provided entropy,
so they are safe to send out-of-band and cheap to type back in. */
use rand::{rngs::OsRng, Rng};

/// Generate a six-digit zero-padded one-time code
pub fn generate_code() -> String {
    let n: u32 = OsRng.gen_range(0..1_000_000);
    format!("{n:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_six_zero_padded_digits() {
        for _ in 0..1000 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            let n: u32 = code.parse().unwrap();
            assert!(n < 1_000_000);
        }
    }

    #[test]
    fn codes_vary_across_calls() {
        let codes: std::collections::HashSet<String> =
            (0..100).map(|_| generate_code()).collect();
        // 100 draws from a million-value space collapsing to a handful
        // would mean the generator is broken
        assert!(codes.len() > 90);
    }
}
