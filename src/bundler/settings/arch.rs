//! CPU architecture types and utilities.

use std::fmt;

/// CPU architecture of a release artifact.
///
/// # Platform Support
///
/// - Linux: X86_64
/// - macOS: X86_64 and AArch64 slices fused into Universal
/// - Windows: X86_64
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    X86_64,
    /// AArch64 / ARM64 (64-bit) - Apple Silicon
    AArch64,
    /// macOS universal binary - Contains both x86_64 and AArch64
    Universal,
}

impl Arch {
    /// Tag used in manifests and artifact records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::AArch64 => "aarch64",
            Arch::Universal => "universal",
        }
    }

    /// Suffix used in canonical file names (`x86_64`, `aarch64`, `Universal`).
    pub fn file_tag(&self) -> &'static str {
        match self {
            Arch::Universal => "Universal",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
