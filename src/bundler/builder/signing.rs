//! Detached artifact signing.
//!
//! The signing key comes from the environment. Its presence switches the
//! pipeline into signed release mode; without it signing and the update
//! manifest are skipped entirely.

use crate::bundler::{
    Result, Settings, SigningSettings,
    error::{Error, ErrorExt},
    utils::{fs, process::run_tool},
};
use std::path::{Path, PathBuf};

/// Signing key material read from the environment.
pub struct SigningKey {
    key: String,
    password: Option<String>,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("key", &"<redacted>")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl SigningKey {
    /// Reads the key from the configured variable; unset or empty means unsigned mode.
    pub fn from_env(signing: &SigningSettings) -> Option<Self> {
        let key = std::env::var(&signing.key_env).ok()?;
        if key.trim().is_empty() {
            return None;
        }

        let password = std::env::var(&signing.password_env)
            .ok()
            .filter(|p| !p.is_empty());

        Some(Self { key, password })
    }
}

/// Path of the detached signature sidecar: `<artifact>.sig`.
pub fn signature_path(artifact: &Path) -> PathBuf {
    let mut name = artifact.as_os_str().to_owned();
    name.push(".sig");
    PathBuf::from(name)
}

/// Runs the external signer for one artifact.
///
/// # Returns
///
/// Path of the `.sig` sidecar the signer produced.
pub async fn sign_artifact(settings: &Settings, key: &SigningKey, artifact: &Path) -> Result<PathBuf> {
    log::info!("Signing {}", artifact.display());

    let signing = settings.signing();
    let mut command = settings.tools().signer().command();
    command
        .arg(artifact)
        .env(&signing.key_env, &key.key)
        .current_dir(settings.project_dir());
    match &key.password {
        Some(password) => command.env(&signing.password_env, password),
        None => command.env_remove(&signing.password_env),
    };

    run_tool(&mut command).await?;

    let sig = signature_path(artifact);
    if !sig.is_file() {
        return Err(Error::MissingSignature(sig));
    }
    Ok(sig)
}

/// Reads a signature sidecar for inlining into the manifest.
pub async fn read_signature(artifact: &Path) -> Result<String> {
    let sig = signature_path(artifact);
    tokio::fs::read_to_string(&sig)
        .await
        .fs_context("reading signature", &sig)
}

/// Deletes the signature sidecars of the given artifacts.
pub async fn remove_signatures<'a, I>(artifacts: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Path>,
{
    for artifact in artifacts {
        let sig = signature_path(artifact);
        log::debug!("Removing {}", sig.display());
        fs::remove_file_if_exists(&sig).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_appends_to_full_name() {
        assert_eq!(
            signature_path(Path::new("/dist/Product-macOS-1.0.0-Universal-Portable.app.tar.gz")),
            PathBuf::from("/dist/Product-macOS-1.0.0-Universal-Portable.app.tar.gz.sig")
        );
        assert_eq!(
            signature_path(Path::new("/dist/Product-Linux-1.0.0-x86_64-Portable")),
            PathBuf::from("/dist/Product-Linux-1.0.0-x86_64-Portable.sig")
        );
    }

    #[test]
    fn unset_or_blank_key_means_unsigned() {
        let signing = SigningSettings {
            key_env: "RELEASE_PACKAGER_TEST_KEY_THAT_IS_NEVER_SET".into(),
            password_env: "RELEASE_PACKAGER_TEST_PASSWORD_THAT_IS_NEVER_SET".into(),
        };
        assert!(SigningKey::from_env(&signing).is_none());
    }

    #[test]
    fn debug_output_redacts_key() {
        let key = SigningKey {
            key: "secret-key".into(),
            password: Some("hunter2".into()),
        };
        let shown = format!("{key:?}");
        assert!(!shown.contains("secret-key") && !shown.contains("hunter2"));
    }

    #[tokio::test]
    async fn removes_sidecars_and_tolerates_missing_ones() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.deb");
        let b = dir.path().join("b.AppImage");
        tokio::fs::write(signature_path(&a), "sig").await.unwrap();

        remove_signatures([a.as_path(), b.as_path()]).await.unwrap();
        assert!(!signature_path(&a).exists());
    }
}
