//! Platform dispatch for the release pipeline.
//!
//! [`Platform`] is the tagged variant behind the per-platform variation:
//! target triples, packager formats, icon inputs and the rename rules that
//! turn packager output into canonical artifact names.
//!
//! # Module Organization
//!
//! - `linux` - portable binary, AppImage and Debian package
//! - `macos` - disk image and archived universal app bundle
//! - `windows` - portable `.exe` and NSIS installer

mod linux;
mod macos;
mod windows;

use crate::bundler::{
    Arch, ArtifactKind, ReleaseArtifact, Settings, ToolCommand,
    error::{Error, Result},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Release platform.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux: `.deb` and AppImage, x86_64
    Linux,
    /// macOS: `.dmg` and archived `.app`, universal binary
    #[value(name = "macos", alias = "darwin")]
    MacOs,
    /// Windows: NSIS installer, x86_64
    Windows,
}

impl Platform {
    /// Platform of the running host; non-Windows, non-macOS hosts release Linux.
    pub fn host() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Lowercase tag used for manifest and staging names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
        }
    }

    /// Tag used in canonical artifact names.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Linux => "Linux",
            Platform::MacOs => "macOS",
            Platform::Windows => "Windows",
        }
    }

    /// Target triples to compile. More than one means the binaries are fused.
    pub fn target_triples(&self) -> &'static [&'static str] {
        match self {
            Platform::Linux => &["x86_64-unknown-linux-gnu"],
            Platform::MacOs => &["x86_64-apple-darwin", "aarch64-apple-darwin"],
            Platform::Windows => &["x86_64-pc-windows-gnu"],
        }
    }

    /// Target directory name for the fused binary, on platforms that fuse.
    pub fn fused_target(&self) -> Option<&'static str> {
        match self {
            Platform::MacOs => Some("universal-apple-darwin"),
            Platform::Linux | Platform::Windows => None,
        }
    }

    /// Architecture of the released artifacts.
    pub fn arch(&self) -> Arch {
        match self {
            Platform::MacOs => Arch::Universal,
            Platform::Linux | Platform::Windows => Arch::X86_64,
        }
    }

    /// Packager formats requested when none are configured. Also the set of
    /// formats the rename rules understand.
    pub fn default_formats(&self) -> &'static [&'static str] {
        match self {
            Platform::Linux => &["deb", "appimage"],
            Platform::MacOs => &["dmg", "app"],
            Platform::Windows => &["nsis"],
        }
    }

    /// Executable file suffix.
    pub fn executable_suffix(&self) -> &'static str {
        match self {
            Platform::Windows => ".exe",
            Platform::Linux | Platform::MacOs => "",
        }
    }

    /// Tools this platform's pipeline invokes.
    ///
    /// `signing` adds the signer; the rasterizer is included when a Linux
    /// icon source is configured.
    pub fn required_tools(&self, settings: &Settings, signing: bool) -> Vec<ToolCommand> {
        let tools = settings.tools();
        let mut required = vec![tools.compiler(), tools.strip(*self)];

        match self {
            Platform::Linux => {
                if settings.icon_settings().linux_source.is_some() {
                    required.push(tools.rasterizer());
                }
            }
            Platform::MacOs => {
                required.push(tools.fuse());
                if settings.formats().iter().any(|f| f == "app") {
                    required.push(tools.archiver());
                }
            }
            Platform::Windows => {}
        }

        required.push(tools.packager());
        if signing {
            required.push(tools.signer());
        }
        required
    }

    /// Renames the staged binary and packager output into canonical artifacts.
    pub async fn collect_artifacts(&self, settings: &Settings) -> Result<Vec<ReleaseArtifact>> {
        match self {
            Platform::Linux => linux::collect_artifacts(settings).await,
            Platform::MacOs => macos::collect_artifacts(settings).await,
            Platform::Windows => windows::collect_artifacts(settings).await,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Finds the packager output matching `file_pattern` in the output directory.
///
/// The packager's naming convention is not fully predictable, so its output
/// is treated as a candidate set. Several candidates are narrowed to those
/// naming the release version.
pub(crate) fn resolve_output(settings: &Settings, file_pattern: &str) -> Result<PathBuf> {
    let escaped_dir = glob::Pattern::escape(&settings.output_dir().to_string_lossy());
    let pattern = Path::new(&escaped_dir)
        .join(file_pattern)
        .to_string_lossy()
        .into_owned();

    // Canonical files from an earlier run match broad patterns like `*.dmg`.
    let canonical_prefix = format!(
        "{}-{}-",
        settings.product_name(),
        settings.platform().display_name()
    );
    let candidates: Vec<PathBuf> = glob::glob(&pattern)?
        .filter_map(|e| e.ok())
        .filter(|p| {
            !p.file_name()
                .map(|n| n.to_string_lossy().starts_with(&canonical_prefix))
                .unwrap_or(false)
        })
        .collect();
    log::debug!("Candidates for {}: {:?}", pattern, candidates);

    select_candidate(&pattern, candidates, settings.version())
}

fn select_candidate(pattern: &str, mut candidates: Vec<PathBuf>, version: &str) -> Result<PathBuf> {
    if candidates.len() > 1 {
        let versioned: Vec<PathBuf> = candidates
            .iter()
            .filter(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().contains(version))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        if !versioned.is_empty() {
            candidates = versioned;
        }
    }

    match candidates.len() {
        0 => Err(Error::MissingOutput {
            pattern: pattern.to_string(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(Error::AmbiguousOutput {
            pattern: pattern.to_string(),
            candidates,
        }),
    }
}

/// Renames `from` to its canonical name in the output directory.
pub(crate) async fn promote(
    settings: &Settings,
    from: &Path,
    kind: ArtifactKind,
    variant: Option<&str>,
    extension: &str,
) -> Result<ReleaseArtifact> {
    let arch = settings.arch();
    let file_name = settings.canonical_file_name(Some(arch), variant, extension);
    let to = settings.output_dir().join(&file_name);

    fs::move_file(from, &to).await?;
    log::info!("✓ {} -> {}", from.display(), file_name);

    Ok(ReleaseArtifact::new(
        settings.platform(),
        arch,
        kind,
        to,
        settings.version(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_candidate_set_is_missing_output() {
        let err = select_candidate("dist/app_*.deb", vec![], "1.0.0").unwrap_err();
        assert!(matches!(err, Error::MissingOutput { .. }));
    }

    #[test]
    fn single_candidate_wins_regardless_of_name() {
        let path = select_candidate("dist/*.app", vec!["dist/Product.app".into()], "1.0.0").unwrap();
        assert_eq!(path, PathBuf::from("dist/Product.app"));
    }

    #[test]
    fn version_narrows_stale_outputs() {
        let path = select_candidate(
            "dist/app_*.deb",
            vec!["dist/app_0.9.0_amd64.deb".into(), "dist/app_1.0.0_amd64.deb".into()],
            "1.0.0",
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("dist/app_1.0.0_amd64.deb"));
    }

    #[test]
    fn unresolvable_candidates_are_ambiguous() {
        let err = select_candidate(
            "dist/app_*.deb",
            vec!["dist/app_1.0.0_amd64.deb".into(), "dist/app_1.0.0_i386.deb".into()],
            "1.0.0",
        )
        .unwrap_err();
        match err {
            Error::AmbiguousOutput { candidates, .. } => assert_eq!(candidates.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn platform_table() {
        assert_eq!(Platform::MacOs.target_triples().len(), 2);
        assert_eq!(Platform::MacOs.arch(), Arch::Universal);
        assert_eq!(Platform::Linux.default_formats(), ["deb", "appimage"]);
        assert_eq!(Platform::Windows.executable_suffix(), ".exe");
        assert_eq!(Platform::MacOs.display_name(), "macOS");
        assert_eq!(Platform::MacOs.fused_target(), Some("universal-apple-darwin"));
        assert_eq!(Platform::Linux.fused_target(), None);
    }

    #[test]
    fn earlier_canonical_artifacts_are_not_candidates() {
        use crate::bundler::{ProductSettings, SettingsBuilder};

        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsBuilder::new()
            .project_dir(dir.path())
            .platform(Platform::MacOs)
            .version("2.0.0")
            .product(ProductSettings {
                name: "Product".into(),
                slug: "product".into(),
                identifier: "com.example.product".into(),
                binary: "product".into(),
                description: String::new(),
            })
            .build()
            .unwrap();
        let dist = settings.output_dir().to_path_buf();
        std::fs::create_dir_all(&dist).unwrap();
        std::fs::write(dist.join("Product-macOS-2.0.0-Universal.dmg"), b"old").unwrap();
        std::fs::write(dist.join("Product_2.0.0_universal.dmg"), b"new").unwrap();

        let path = resolve_output(&settings, "*.dmg").unwrap();
        assert_eq!(path, dist.join("Product_2.0.0_universal.dmg"));
    }

    #[test]
    fn serde_and_cli_names_agree() {
        use clap::ValueEnum;
        for platform in [Platform::Linux, Platform::MacOs, Platform::Windows] {
            let json = serde_json::to_string(&platform).unwrap();
            assert_eq!(json, format!("\"{}\"", platform.as_str()));
            assert_eq!(Platform::from_str(platform.as_str(), true).unwrap(), platform);
        }
    }
}
