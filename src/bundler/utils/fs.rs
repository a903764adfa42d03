//! File system utilities for the release pipeline.
//!
//! Renames replace an existing destination so reruns stay idempotent.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes a file, treating a missing file as success.
pub async fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(Error::Fs {
            context: "removing file".into(),
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Moves a file to `to`, replacing any existing file there.
///
/// Falls back to copy + remove when the rename crosses file systems.
pub async fn move_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if let Some(dest_dir) = to.parent() {
        create_dir_all(dest_dir).await?;
    }

    // Windows: rename() fails if target exists, must remove first
    if to.is_file() {
        remove_file_if_exists(to).await?;
    }

    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!("rename crosses devices, copying {} instead", from.display());
            copy_file(from, to).await?;
            fs::remove_file(from)
                .await
                .fs_context("removing moved file", from)
        }
        Err(e) => Err(Error::Fs {
            context: format!("renaming to {}", to.display()),
            path: from.to_path_buf(),
            source: e,
        }),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        create_dir_all(dest_dir).await?;
    }
    fs::copy(from, to).await.fs_context("copying file", from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn move_file_replaces_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("staged");
        let to = dir.path().join("dist").join("Product-Portable");

        tokio::fs::write(&from, b"new").await.unwrap();
        tokio::fs::create_dir_all(to.parent().unwrap()).await.unwrap();
        tokio::fs::write(&to, b"old").await.unwrap();

        move_file(&from, &to).await.unwrap();

        assert!(!from.exists());
        assert_eq!(tokio::fs::read(&to).await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn move_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = move_file(&dir.path().join("nope"), &dir.path().join("x"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn removing_absent_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        remove_file_if_exists(&dir.path().join("a.sig")).await.unwrap();
    }
}
