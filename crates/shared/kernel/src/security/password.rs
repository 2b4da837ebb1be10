//! Salted password hashing for admin credentials.
//!
//! Stored form is `<salt-hex>$<digest-hex>` where the digest is
//! SHA-256 over `salt || password`. Plaintext passwords exist only in
//! transit; nothing in the stored form reveals them.

use getrandom::fill;
use sha2::{Digest, Sha256};
use std::borrow::Cow;

const SALT_LEN: usize = 16;

/// A specialized [`SecurityError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum SecurityError {
    #[error("Entropy source failure{}: {message}", format_context(.context))]
    Entropy { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

pub trait SecurityErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, SecurityError>;
}

impl<T> SecurityErrorExt<T> for Result<T, SecurityError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                SecurityError::Entropy { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

/// Hashes `plain` with a fresh random salt.
///
/// # Errors
/// Returns [`SecurityError::Entropy`] if the system entropy source fails.
pub fn hash_password(plain: &str) -> Result<String, SecurityError> {
    let mut salt = [0u8; SALT_LEN];

    fill(&mut salt).map_err(|e| SecurityError::Entropy {
        message: e.to_string().into(),
        context: Some("Failed to generate password salt".into()),
    })?;

    Ok(format!("{}${}", hex::encode(salt), hex::encode(digest(&salt, plain))))
}

/// Verifies `plain` against a stored `<salt-hex>$<digest-hex>` value.
///
/// Malformed stored values never verify.
#[must_use]
pub fn verify_password(stored: &str, plain: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(expected) = hex::decode(digest_hex) else {
        return false;
    };

    constant_time_eq(&digest(&salt, plain), &expected)
}

fn digest(salt: &[u8], plain: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(plain.as_bytes());
    hasher.finalize().into()
}

// Comparison cost must not depend on where the digests diverge.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
