//! Checksum calculation for dataset snapshots.

use sha2::{Digest, Sha256};

use crate::models::grid::RawTimetableSet;

/// Calculate SHA-256 checksum of text content.
///
/// # Arguments
/// * `content` - Text to hash
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Checksum of a dataset's canonical (compact, order-preserving) JSON form.
pub fn dataset_checksum(dataset: &RawTimetableSet) -> String {
    calculate_checksum(&dataset.to_value().to_string())
}
