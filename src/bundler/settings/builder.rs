//! Builder for constructing Settings.

use super::{FormatSettings, IconSettings, ProductSettings, Settings, SigningSettings, ToolSettings};
use crate::bundler::{Error, Result, error::ErrorExt, normalize_version, platform::Platform};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Relative paths are resolved against the project directory, the raw version
/// is normalized, and requested formats are checked against the platform.
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    product: Option<ProductSettings>,
    platform: Option<Platform>,
    version: Option<String>,
    project_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    target_dir: Option<PathBuf>,
    repository_url: Option<String>,
    version_env: Option<String>,
    icons: IconSettings,
    formats: FormatSettings,
    tools: ToolSettings,
    signing: SigningSettings,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets product metadata.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn product(mut self, product: ProductSettings) -> Self {
        self.product = Some(product);
        self
    }

    /// Sets the platform. Default: the host platform.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Sets the raw version (`v1.2.3` or `1.2.3`).
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the project root. Default: the current directory.
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the artifact output directory. Default: `<project>/dist`.
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the cargo target directory. Default: `<project>/target`.
    pub fn target_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.target_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the repository base URL used for manifest download links.
    pub fn repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }

    /// Sets the version-broadcast variable. Default: `<SLUG>_RELEASE_VERSION`.
    pub fn version_env(mut self, name: impl Into<String>) -> Self {
        self.version_env = Some(name.into());
        self
    }

    /// Sets icon inputs.
    pub fn icons(mut self, icons: IconSettings) -> Self {
        self.icons = icons;
        self
    }

    /// Sets packager format overrides.
    pub fn formats(mut self, formats: FormatSettings) -> Self {
        self.formats = formats;
        self
    }

    /// Sets the external toolchain.
    pub fn tools(mut self, tools: ToolSettings) -> Self {
        self.tools = tools;
        self
    }

    /// Sets signing variable names.
    pub fn signing(mut self, signing: SigningSettings) -> Self {
        self.signing = signing;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the version or product metadata is
    /// missing, when a format is not supported by the platform, or
    /// [`Error::Url`] for an unparsable repository URL.
    pub fn build(self) -> Result<Settings> {
        let version = self
            .version
            .as_deref()
            .and_then(normalize_version)
            .ok_or_else(|| Error::Config("version is required".into()))?;

        let product = self
            .product
            .ok_or_else(|| Error::Config("product settings are required".into()))?;
        for (field, value) in [
            ("product.name", &product.name),
            ("product.slug", &product.slug),
            ("product.identifier", &product.identifier),
            ("product.binary", &product.binary),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{field} must not be empty")));
            }
        }

        let platform = self.platform.unwrap_or_else(Platform::host);

        let project_dir = match self.project_dir {
            Some(dir) => dir,
            None => std::env::current_dir().fs_context("reading current directory", ".")?,
        };
        let project_dir = project_dir
            .absolutize()
            .fs_context("resolving project directory", &project_dir)?
            .into_owned();

        let resolve = |path: Option<PathBuf>, default: &str| -> Result<PathBuf> {
            let path = path.unwrap_or_else(|| PathBuf::from(default));
            Ok(path
                .absolutize_from(&project_dir)
                .fs_context("resolving path", &path)?
                .into_owned())
        };
        let output_dir = resolve(self.output_dir, "dist")?;
        let target_dir = resolve(self.target_dir, "target")?;

        let formats = self.formats.for_platform(platform);
        if formats.is_empty() {
            return Err(Error::Config(format!(
                "no package formats configured for {}",
                platform.display_name()
            )));
        }
        for format in &formats {
            if !platform.default_formats().contains(&format.as_str()) {
                return Err(Error::Config(format!(
                    "format '{}' is not supported on {} (supported: {})",
                    format,
                    platform.display_name(),
                    platform.default_formats().join(", ")
                )));
            }
        }

        let repository_url = self
            .repository_url
            .as_deref()
            .map(url::Url::parse)
            .transpose()?;

        let version_env = self
            .version_env
            .unwrap_or_else(|| product.default_version_env());

        let icons = self.icons.resolve_against(&project_dir);

        Ok(Settings::new(
            product,
            platform,
            version,
            project_dir,
            output_dir,
            target_dir,
            repository_url,
            version_env,
            icons,
            self.formats,
            self.tools,
            self.signing,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::Arch;

    fn product() -> ProductSettings {
        ProductSettings {
            name: "Product".into(),
            slug: "product".into(),
            identifier: "com.example.product".into(),
            binary: "product-bin".into(),
            description: String::new(),
        }
    }

    fn builder(platform: Platform) -> SettingsBuilder {
        SettingsBuilder::new()
            .project_dir("/work/product")
            .platform(platform)
            .version("v2.5.0")
            .product(product())
    }

    #[test]
    fn normalizes_version_and_resolves_paths() {
        let settings = builder(Platform::Linux).build().unwrap();

        assert_eq!(settings.version(), "2.5.0");
        assert_eq!(settings.output_dir(), Path::new("/work/product/dist"));
        assert_eq!(
            settings.compiled_binary_path("x86_64-unknown-linux-gnu"),
            PathBuf::from("/work/product/target/x86_64-unknown-linux-gnu/release/product-bin")
        );
        assert_eq!(
            settings.staged_binary_path(),
            PathBuf::from("/work/product/target/release-packager/linux/product")
        );
        assert_eq!(settings.version_env(), "PRODUCT_RELEASE_VERSION");
    }

    #[test]
    fn windows_binaries_carry_exe_suffix() {
        let settings = builder(Platform::Windows).build().unwrap();
        assert!(settings.staged_binary_path().ends_with("windows/product.exe"));
        assert!(
            settings
                .compiled_binary_path("x86_64-pc-windows-gnu")
                .ends_with("release/product-bin.exe")
        );
    }

    #[test]
    fn canonical_names_follow_the_pattern() {
        let linux = builder(Platform::Linux).build().unwrap();
        assert_eq!(
            linux.canonical_file_name(Some(Arch::X86_64), Some("Portable"), ""),
            "Product-Linux-2.5.0-x86_64-Portable"
        );
        assert_eq!(
            linux.canonical_file_name(Some(Arch::X86_64), None, ".AppImage"),
            "Product-Linux-2.5.0-x86_64.AppImage"
        );

        let mac = builder(Platform::MacOs).build().unwrap();
        assert_eq!(
            mac.canonical_file_name(Some(Arch::Universal), Some("Portable"), ".app.tar.gz"),
            "Product-macOS-2.5.0-Universal-Portable.app.tar.gz"
        );
    }

    #[test]
    fn canonical_names_are_stable_across_builds() {
        let a = builder(Platform::Windows).build().unwrap();
        let b = builder(Platform::Windows).build().unwrap();
        assert_eq!(
            a.canonical_file_name(Some(Arch::X86_64), Some("Setup"), ".exe"),
            b.canonical_file_name(Some(Arch::X86_64), Some("Setup"), ".exe")
        );
    }

    #[test]
    fn rejects_missing_version() {
        let err = SettingsBuilder::new()
            .product(product())
            .version("v")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn rejects_unsupported_format() {
        let err = builder(Platform::Windows)
            .formats(FormatSettings {
                windows: Some(vec!["msi".into()]),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("'msi' is not supported on Windows"));
    }

    #[test]
    fn rejects_bad_repository_url() {
        let err = builder(Platform::Linux)
            .repository_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }
}
