//! Update manifest generation.
//!
//! One manifest per platform, written only in signed mode:
//!
//! ```json
//! {
//!   "version": "2.5.0",
//!   "downloads": {
//!     "x86_64": {
//!       "disk-image": { "download": "...", "size": 123, "sha1": "...", "sig": "..." }
//!     }
//!   }
//! }
//! ```

use super::{checksum::calculate_sha1, signing::read_signature};
use crate::bundler::{
    ArtifactKind, Platform, ReleaseArtifact, Result, Settings,
    error::{Error, ErrorExt},
};
use std::{collections::BTreeMap, path::PathBuf};
use url::Url;

/// Download information for one artifact.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ManifestEntry {
    /// Public download URL.
    pub download: String,
    /// File size in bytes.
    pub size: u64,
    /// Hex SHA-1 of the file.
    pub sha1: String,
    /// Detached signature contents.
    pub sig: String,
}

/// Update manifest for one platform.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateManifest {
    /// Normalized release version.
    pub version: String,
    /// Architecture or variant → artifact kind → entry.
    pub downloads: BTreeMap<String, BTreeMap<ArtifactKind, ManifestEntry>>,
}

/// File name of a platform's manifest: `update_manifest_<platform>.json`.
pub fn manifest_file_name(platform: Platform) -> String {
    format!("update_manifest_{}.json", platform.as_str())
}

/// Download URL: `<repository>/releases/download/v<version>/<file name>`.
pub fn download_url(repository: &Url, version: &str, file_name: &str) -> Result<Url> {
    let tag = format!("v{version}");
    let mut url = repository.clone();
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("repository URL {repository} cannot be a base")))?
        .pop_if_empty()
        .extend(["releases", "download", tag.as_str(), file_name]);
    Ok(url)
}

/// Reads size, checksum and signature of every artifact and assembles the manifest.
///
/// The artifacts are updated in place with the values that went into the
/// manifest. Every artifact must exist on disk and carry a `.sig` sidecar.
pub async fn build_manifest(
    settings: &Settings,
    artifacts: &mut [ReleaseArtifact],
) -> Result<UpdateManifest> {
    let repository = settings.repository_url().ok_or_else(|| {
        Error::Config(
            "repository.url is required to publish an update manifest".to_string(),
        )
    })?;

    let mut downloads: BTreeMap<String, BTreeMap<ArtifactKind, ManifestEntry>> = BTreeMap::new();

    for artifact in artifacts.iter_mut() {
        let metadata = tokio::fs::metadata(&artifact.path)
            .await
            .fs_context("reading artifact metadata", &artifact.path)?;
        let size = metadata.len();
        let sha1 = calculate_sha1(&artifact.path).await?;
        let sig = read_signature(&artifact.path).await?;

        let file_name = artifact.file_name().ok_or_else(|| {
            Error::GenericError(format!(
                "artifact path {} has no UTF-8 file name",
                artifact.path.display()
            ))
        })?;
        let download = download_url(repository, &artifact.version, file_name)?;

        let entry = ManifestEntry {
            download: download.to_string(),
            size,
            sha1: sha1.clone(),
            sig: sig.clone(),
        };

        artifact.size_bytes = Some(size);
        artifact.checksum = Some(sha1);
        artifact.signature = Some(sig);

        if downloads
            .entry(artifact.architecture.clone())
            .or_default()
            .insert(artifact.kind, entry)
            .is_some()
        {
            return Err(Error::GenericError(format!(
                "duplicate {} artifact for {}",
                artifact.kind, artifact.architecture
            )));
        }
    }

    Ok(UpdateManifest {
        version: settings.version().to_string(),
        downloads,
    })
}

/// Writes the manifest to the output directory.
pub async fn write_manifest(settings: &Settings, manifest: &UpdateManifest) -> Result<PathBuf> {
    let path = settings
        .output_dir()
        .join(manifest_file_name(settings.platform()));
    let json = serde_json::to_string_pretty(manifest)?;

    tokio::fs::write(&path, json)
        .await
        .fs_context("writing update manifest", &path)?;
    log::info!("✓ Wrote update manifest {}", path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::signing::signature_path;
    use crate::bundler::{Arch, ProductSettings, SettingsBuilder};

    #[test]
    fn download_urls_point_at_tagged_release() {
        let repo = Url::parse("https://github.com/example/product").unwrap();
        let url = download_url(&repo, "2.5.0", "Product-Linux-2.5.0-x86_64.AppImage").unwrap();
        assert_eq!(
            url.as_str(),
            "https://github.com/example/product/releases/download/v2.5.0/Product-Linux-2.5.0-x86_64.AppImage"
        );

        let trailing = Url::parse("https://github.com/example/product/").unwrap();
        let url = download_url(&trailing, "2.5.0", "a.deb").unwrap();
        assert_eq!(
            url.as_str(),
            "https://github.com/example/product/releases/download/v2.5.0/a.deb"
        );
    }

    #[test]
    fn manifest_file_is_named_per_platform() {
        assert_eq!(manifest_file_name(Platform::MacOs), "update_manifest_macos.json");
    }

    #[tokio::test]
    async fn entries_match_files_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsBuilder::new()
            .project_dir(dir.path())
            .platform(Platform::Linux)
            .version("v2.5.0")
            .repository_url("https://github.com/example/product")
            .product(ProductSettings {
                name: "Product".into(),
                slug: "product".into(),
                identifier: "com.example.product".into(),
                binary: "product".into(),
                description: String::new(),
            })
            .build()
            .unwrap();

        let path = dir.path().join("Product-Linux-2.5.0-x86_64.AppImage");
        tokio::fs::write(&path, b"abc").await.unwrap();
        tokio::fs::write(signature_path(&path), "untrusted comment\nRWQ=").await.unwrap();

        let mut artifacts = vec![ReleaseArtifact::new(
            Platform::Linux,
            Arch::X86_64,
            ArtifactKind::DiskImage,
            path,
            "2.5.0",
        )];
        let manifest = build_manifest(&settings, &mut artifacts).await.unwrap();

        let entry = &manifest.downloads["x86_64"][&ArtifactKind::DiskImage];
        assert_eq!(manifest.version, "2.5.0");
        assert_eq!(entry.size, 3);
        assert_eq!(entry.sha1, "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(entry.sig, "untrusted comment\nRWQ=");
        assert_eq!(artifacts[0].size_bytes, Some(3));

        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["downloads"]["x86_64"]["disk-image"]["size"], 3);
    }

    #[tokio::test]
    async fn missing_repository_is_a_config_error() {
        let settings = SettingsBuilder::new()
            .project_dir("/work/product")
            .platform(Platform::Windows)
            .version("1.0.0")
            .product(ProductSettings {
                name: "Product".into(),
                slug: "product".into(),
                identifier: "com.example.product".into(),
                binary: "product".into(),
                description: String::new(),
            })
            .build()
            .unwrap();

        let err = build_manifest(&settings, &mut []).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
