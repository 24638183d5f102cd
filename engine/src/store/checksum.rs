//! Dataset fingerprinting for duplicate-import detection.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::store::repository::{StoreError, StoreResult};

/// Compute a SHA-256 fingerprint of a serializable dataset.
///
/// The value is serialized to canonical JSON and hashed; two imports of
/// the same data therefore produce the same checksum regardless of the
/// file they came from.
///
/// # Examples
///
/// ```
/// use siteline_engine::store::checksum::calculate_checksum;
///
/// let a = calculate_checksum(&vec!["x", "y"]).unwrap();
/// let b = calculate_checksum(&vec!["x", "y"]).unwrap();
/// let c = calculate_checksum(&vec!["x", "z"]).unwrap();
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// ```
pub fn calculate_checksum<T: Serialize>(value: &T) -> StoreResult<String> {
    let bytes = serde_json::to_vec(value)
        .map_err(|e| StoreError::Internal(format!("Failed to serialize dataset: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}
