//! Release artifact records.

use super::{Arch, platform::Platform};
use std::path::{Path, PathBuf};

/// What kind of file a release artifact is.
///
/// The kebab-case serialization is the artifact-kind key of the update manifest.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// Standalone executable, runs without installation.
    PortableExecutable,
    /// Platform-native installer (`.deb`, NSIS setup `.exe`).
    InstallerPackage,
    /// Mountable image (`.dmg`, `.AppImage`).
    DiskImage,
    /// Compressed bundle (the archived macOS `.app`).
    Archive,
}

impl ArtifactKind {
    /// Manifest key for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::PortableExecutable => "portable-executable",
            ArtifactKind::InstallerPackage => "installer-package",
            ArtifactKind::DiskImage => "disk-image",
            ArtifactKind::Archive => "archive",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonically named file in the output directory.
///
/// `size_bytes`, `checksum` and `signature` are filled in only while the
/// update manifest is generated, i.e. in signed mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseArtifact {
    /// Platform the artifact targets.
    pub platform: Platform,
    /// Architecture tag, e.g. `x86_64` or `universal`.
    pub architecture: String,
    /// Artifact kind.
    pub kind: ArtifactKind,
    /// Location in the output directory.
    pub path: PathBuf,
    /// Normalized version.
    pub version: String,
    /// File size, read from disk at manifest time.
    pub size_bytes: Option<u64>,
    /// Hex SHA-1 of the contents, computed at manifest time.
    pub checksum: Option<String>,
    /// Detached signature contents.
    pub signature: Option<String>,
}

impl ReleaseArtifact {
    /// Creates an artifact record for a file that has just been renamed into place.
    pub fn new(
        platform: Platform,
        arch: Arch,
        kind: ArtifactKind,
        path: PathBuf,
        version: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            architecture: arch.as_str().to_string(),
            kind,
            path,
            version: version.into(),
            size_bytes: None,
            checksum: None,
            signature: None,
        }
    }

    /// File name of the artifact, as published.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    /// Returns the artifact path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
