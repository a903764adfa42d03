//! Core Settings struct and implementations.

use super::{Arch, FormatSettings, IconSettings, ProductSettings, SigningSettings, ToolSettings};
use crate::bundler::platform::Platform;
use std::path::{Path, PathBuf};
use url::Url;

/// Resolved settings for one platform release run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). All paths are absolute.
///
/// # Examples
///
/// ```no_run
/// use release_packager::bundler::{Platform, ProductSettings, SettingsBuilder};
///
/// # fn example() -> release_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir("/work/launcher")
///     .platform(Platform::Linux)
///     .version("v2.5.0")
///     .product(ProductSettings {
///         name: "Launcher".into(),
///         slug: "launcher".into(),
///         identifier: "com.example.launcher".into(),
///         binary: "launcher".into(),
///         ..Default::default()
///     })
///     .build()?;
///
/// assert_eq!(settings.version(), "2.5.0");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    product: ProductSettings,
    platform: Platform,
    /// Normalized version, never carries a leading `v`.
    version: String,
    project_dir: PathBuf,
    output_dir: PathBuf,
    target_dir: PathBuf,
    repository_url: Option<Url>,
    version_env: String,
    icons: IconSettings,
    formats: FormatSettings,
    tools: ToolSettings,
    signing: SigningSettings,
}

impl Settings {
    /// Returns the product metadata.
    pub fn product(&self) -> &ProductSettings {
        &self.product
    }

    /// Returns the product display name.
    pub fn product_name(&self) -> &str {
        &self.product.name
    }

    /// Returns the internal slug.
    pub fn slug(&self) -> &str {
        &self.product.slug
    }

    /// Returns the platform being released.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the normalized version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the project root.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns the directory receiving canonical artifacts (`dist/`).
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the cargo target directory.
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Returns the directory holding the staged binary and packager config.
    pub fn staging_dir(&self) -> PathBuf {
        self.target_dir
            .join("release-packager")
            .join(self.platform.as_str())
    }

    /// Returns the repository base URL used for download links.
    pub fn repository_url(&self) -> Option<&Url> {
        self.repository_url.as_ref()
    }

    /// Returns the variable broadcasting the version to the compiled application.
    pub fn version_env(&self) -> &str {
        &self.version_env
    }

    /// Returns the icon paths for this platform.
    pub fn icons(&self) -> &[PathBuf] {
        self.icons.for_platform(self.platform)
    }

    /// Returns the full icon configuration.
    pub fn icon_settings(&self) -> &IconSettings {
        &self.icons
    }

    /// Returns the packager formats for this platform.
    pub fn formats(&self) -> Vec<String> {
        self.formats.for_platform(self.platform)
    }

    /// Returns the external toolchain.
    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    /// Returns the signing configuration.
    pub fn signing(&self) -> &SigningSettings {
        &self.signing
    }

    /// Returns the architecture of the released artifacts.
    pub fn arch(&self) -> Arch {
        self.platform.arch()
    }

    /// Path of the compiler output for a target triple.
    pub fn compiled_binary_path(&self, target: &str) -> PathBuf {
        self.target_dir
            .join(target)
            .join("release")
            .join(format!("{}{}", self.product.binary, self.platform.executable_suffix()))
    }

    /// Path of the staged binary handed to the packager.
    pub fn staged_binary_path(&self) -> PathBuf {
        self.staging_dir()
            .join(format!("{}{}", self.product.slug, self.platform.executable_suffix()))
    }

    /// Builds a canonical artifact file name:
    /// `<Product>-<Platform>-<version>[-<arch>][-<variant>]<extension>`.
    ///
    /// `extension` includes its leading dot, or is empty for bare binaries.
    pub fn canonical_file_name(
        &self,
        arch: Option<Arch>,
        variant: Option<&str>,
        extension: &str,
    ) -> String {
        let mut name = format!(
            "{}-{}-{}",
            self.product.name,
            self.platform.display_name(),
            self.version
        );
        if let Some(arch) = arch {
            name.push('-');
            name.push_str(arch.file_tag());
        }
        if let Some(variant) = variant {
            name.push('-');
            name.push_str(variant);
        }
        name.push_str(extension);
        name
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        product: ProductSettings,
        platform: Platform,
        version: String,
        project_dir: PathBuf,
        output_dir: PathBuf,
        target_dir: PathBuf,
        repository_url: Option<Url>,
        version_env: String,
        icons: IconSettings,
        formats: FormatSettings,
        tools: ToolSettings,
        signing: SigningSettings,
    ) -> Self {
        Self {
            product,
            platform,
            version,
            project_dir,
            output_dir,
            target_dir,
            repository_url,
            version_env,
            icons,
            formats,
            tools,
            signing,
        }
    }
}
