//! In-memory set of revoked token identifiers.

use std::collections::HashSet;
use std::sync::RwLock;

/// Revoked token IDs (`jti`), shared between the issuer and request handlers.
///
/// Entries live for the lifetime of the process.
#[derive(Debug, Default)]
pub struct RevocationSet {
    revoked: RwLock<HashSet<String>>,
}

impl RevocationSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a token ID as revoked. Returns false if it already was.
    pub fn revoke(&self, jti: &str) -> bool {
        self.revoked
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(jti.to_string())
    }

    /// Check whether a token ID has been revoked.
    pub fn is_revoked(&self, jti: &str) -> bool {
        self.revoked
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains(jti)
    }

    /// Number of revoked IDs.
    pub fn len(&self) -> usize {
        self.revoked.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Check if nothing has been revoked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
