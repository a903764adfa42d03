//! Icon, format and signing configuration.

use crate::bundler::platform::Platform;
use std::path::PathBuf;

/// Platform icon inputs handed to the packager.
///
/// ```toml
/// [icons]
/// linux = ["package/icon.png"]
/// linux_source = "package/icon.svg"
/// macos = ["package/icon.icns"]
/// windows = ["package/icon.ico"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconSettings {
    /// PNG icon(s) for Linux packages.
    pub linux: Vec<PathBuf>,

    /// SVG rasterized into the Linux PNG before packaging, replacing `linux`.
    pub linux_source: Option<PathBuf>,

    /// `.icns` icon for macOS.
    pub macos: Vec<PathBuf>,

    /// `.ico` icon for Windows.
    pub windows: Vec<PathBuf>,
}

impl IconSettings {
    /// Icon paths configured for a platform.
    pub fn for_platform(&self, platform: Platform) -> &[PathBuf] {
        match platform {
            Platform::Linux => &self.linux,
            Platform::MacOs => &self.macos,
            Platform::Windows => &self.windows,
        }
    }

    /// Resolves every relative path against `base`.
    pub(crate) fn resolve_against(mut self, base: &std::path::Path) -> Self {
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        self.linux = self.linux.into_iter().map(resolve).collect();
        self.macos = self.macos.into_iter().map(resolve).collect();
        self.windows = self.windows.into_iter().map(resolve).collect();
        self.linux_source = self.linux_source.map(resolve);
        self
    }
}

/// Per-platform override of the packager output formats.
///
/// Unset platforms use [`Platform::default_formats`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatSettings {
    /// Linux formats (`deb`, `appimage`).
    pub linux: Option<Vec<String>>,
    /// macOS formats (`dmg`, `app`).
    pub macos: Option<Vec<String>>,
    /// Windows formats (`nsis`).
    pub windows: Option<Vec<String>>,
}

impl FormatSettings {
    /// Formats to request from the packager for a platform.
    pub fn for_platform(&self, platform: Platform) -> Vec<String> {
        let configured = match platform {
            Platform::Linux => self.linux.as_ref(),
            Platform::MacOs => self.macos.as_ref(),
            Platform::Windows => self.windows.as_ref(),
        };

        match configured {
            Some(formats) => formats.clone(),
            None => platform
                .default_formats()
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

/// Names of the environment variables carrying the signing key.
///
/// The key's presence switches the pipeline into signed release mode.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SigningSettings {
    /// Variable holding the private signing key.
    pub key_env: String,

    /// Variable holding the key password.
    pub password_env: String,
}

impl Default for SigningSettings {
    fn default() -> Self {
        Self {
            key_env: "CARGO_PACKAGER_SIGN_PRIVATE_KEY".to_string(),
            password_env: "CARGO_PACKAGER_SIGN_PRIVATE_KEY_PASSWORD".to_string(),
        }
    }
}
