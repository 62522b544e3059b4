//! Accepted key set.
//!
//! Keys are stored as SHA-256 digests so every comparison runs over 32 bytes
//! regardless of what the caller sent, and the plaintext does not sit in the
//! long-lived state. Membership is checked against every digest without
//! short-circuiting.

use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};
use thiserror::Error;

/// Keys shorter than this still work but are reported at startup.
pub const RECOMMENDED_MIN_KEY_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeySetError {
    #[error("API key authentication is enabled but no API keys are configured (set API_KEYS)")]
    Empty,
}

#[derive(Clone, Default)]
pub struct AcceptedKeys {
    digests: Vec<[u8; 32]>,
}

impl AcceptedKeys {
    /// Build from individual keys. Blank entries are dropped and duplicates
    /// collapsed; the result may be empty, in which case nothing matches.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut digests: Vec<[u8; 32]> = Vec::new();
        for key in keys {
            let key = key.as_ref().trim();
            if key.is_empty() {
                continue;
            }
            let digest = digest(key);
            if !digests.contains(&digest) {
                digests.push(digest);
            }
        }
        Self { digests }
    }

    /// An empty set is a startup error when authentication is required.
    pub fn require_non_empty(keys: Self) -> Result<Self, KeySetError> {
        if keys.is_empty() {
            return Err(KeySetError::Empty);
        }
        Ok(keys)
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    pub fn contains(&self, candidate: &str) -> bool {
        let candidate = digest(candidate);
        let found = self
            .digests
            .iter()
            .fold(Choice::from(0), |acc, accepted| {
                acc | accepted[..].ct_eq(&candidate[..])
            });
        found.into()
    }
}

impl std::fmt::Debug for AcceptedKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcceptedKeys")
            .field("count", &self.digests.len())
            .finish()
    }
}

fn digest(key: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.finalize().into()
}

/// Short, non-reversible tag for correlating a key in logs.
pub fn fingerprint(key: &str) -> String {
    hex::encode(&digest(key)[..4])
}
