//! Artifact checksum calculation.
//!
//! This module provides the SHA-1 content checksum recorded in the update
//! manifest for each artifact.

use crate::bundler::{Result, error::ErrorExt};
use sha1::{Digest, Sha1};
use tokio::io::AsyncReadExt;

/// Calculates the SHA-1 checksum of a file.
///
/// Reads the file in 8KB chunks to handle large files efficiently.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-1 hash (40 characters)
/// * `Err` - If the file cannot be read
pub async fn calculate_sha1(file_path: &std::path::Path) -> Result<String> {
    let mut file = tokio::fs::File::open(file_path)
        .await
        .fs_context("opening file for hashing", file_path)?;
    let mut hasher = Sha1::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", file_path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::calculate_sha1;

    #[tokio::test]
    async fn known_digests() {
        let dir = tempfile::tempdir().unwrap();

        let empty = dir.path().join("empty");
        tokio::fs::write(&empty, b"").await.unwrap();
        assert_eq!(
            calculate_sha1(&empty).await.unwrap(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );

        let abc = dir.path().join("abc");
        tokio::fs::write(&abc, b"abc").await.unwrap();
        assert_eq!(
            calculate_sha1(&abc).await.unwrap(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[tokio::test]
    async fn spans_multiple_buffers() {
        let dir = tempfile::tempdir().unwrap();
        let big = dir.path().join("big");
        tokio::fs::write(&big, vec![b'a'; 1_000_000]).await.unwrap();
        // SHA-1 of one million 'a' characters
        assert_eq!(
            calculate_sha1(&big).await.unwrap(),
            "34aa973cd4c4daa4f61eeb2bdbad27316534016f"
        );
    }

    #[tokio::test]
    async fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(calculate_sha1(&dir.path().join("gone")).await.is_err());
    }
}
