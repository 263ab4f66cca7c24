//! Content fingerprints for action logs.
//!
//! Hash input is the canonical JSON of the action array (serde_json, no
//! pretty-printing). Field order within an action is fixed by its type and
//! unknown-type payloads are stored in sorted maps, so the same log always
//! hashes to the same value.

use sha2::{Digest, Sha256};

use reprise_contracts::{
    action::Action,
    error::{RepriseError, RepriseResult},
};

/// Compute the SHA-256 fingerprint of `actions` as 64 lowercase hex chars.
pub fn fingerprint(actions: &[Action]) -> RepriseResult<String> {
    let canonical = serde_json::to_vec(actions).map_err(|e| RepriseError::Serialization {
        reason: format!("cannot canonicalize actions: {e}"),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(hex::encode(hasher.finalize()))
}

/// Return true when `expected` is the fingerprint of `actions`.
///
/// Comparison is case-insensitive on the hex digits.
pub fn verify_fingerprint(actions: &[Action], expected: &str) -> RepriseResult<bool> {
    Ok(fingerprint(actions)?.eq_ignore_ascii_case(expected))
}
