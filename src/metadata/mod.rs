//! Release configuration from `Release.toml`, with `Cargo.toml` fallbacks.

use crate::bundler::{
    FormatSettings, IconSettings, ProductSettings, SettingsBuilder, SigningSettings, ToolSettings,
};
use crate::error::{CliError, ReleaseError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file name in the project root.
pub const DEFAULT_CONFIG_FILE: &str = "Release.toml";

/// `[product]` section; every field may fall back to `Cargo.toml`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductConfig {
    /// Display name used in artifact names
    pub name: Option<String>,
    /// Internal slug
    pub slug: Option<String>,
    /// Reverse-domain identifier
    pub identifier: Option<String>,
    /// Cargo binary target
    pub binary: Option<String>,
    /// Short description
    pub description: Option<String>,
}

/// `[repository]` section.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Repository base URL for download links
    pub url: Option<String>,
}

/// `[build]` section.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Cargo target directory, relative to the project
    pub target_dir: Option<PathBuf>,
    /// Version-broadcast variable name
    pub version_env: Option<String>,
}

/// Complete `Release.toml` contents.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Product metadata
    pub product: ProductConfig,
    /// Repository for download URLs
    pub repository: RepositoryConfig,
    /// Build options
    pub build: BuildConfig,
    /// Icon inputs
    pub icons: IconSettings,
    /// Signing variable names
    pub signing: SigningSettings,
    /// Packager format overrides
    pub formats: FormatSettings,
    /// External toolchain overrides
    pub tools: ToolSettings,
}

/// Package metadata extracted from Cargo.toml
#[derive(Debug, Default, Clone)]
pub struct PackageMetadata {
    /// Package name from Cargo.toml
    pub name: Option<String>,

    /// Package description from Cargo.toml
    pub description: Option<String>,

    /// Repository URL from Cargo.toml
    pub repository: Option<String>,

    /// Primary binary name (from [[bin]] or package.name)
    pub binary_name: Option<String>,
}

/// Loads the release configuration for a project.
///
/// An explicit `config_path` must exist. Without one, `<project>/Release.toml`
/// is used when present, otherwise every value comes from `Cargo.toml` and
/// built-in defaults. Missing product fields are filled from `Cargo.toml`.
pub fn load_release_config(project_dir: &Path, config_path: Option<&Path>) -> Result<ReleaseConfig> {
    let path = match config_path {
        Some(path) if path.is_absolute() => Some(path.to_path_buf()),
        Some(path) => Some(project_dir.join(path)),
        None => {
            let default = project_dir.join(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        }
    };

    let mut config = match path {
        Some(path) => {
            log::debug!("Loading release config from {}", path.display());
            let contents = std::fs::read_to_string(&path).map_err(|e| {
                ReleaseError::Cli(CliError::ExecutionFailed {
                    command: "read_release_config".to_string(),
                    reason: format!("Failed to read {}: {}", path.display(), e),
                })
            })?;
            toml::from_str::<ReleaseConfig>(&contents)?
        }
        None => {
            log::debug!("No {} found, using Cargo.toml and defaults", DEFAULT_CONFIG_FILE);
            ReleaseConfig::default()
        }
    };

    let cargo_toml = project_dir.join("Cargo.toml");
    if cargo_toml.is_file() {
        let package = load_package_metadata(&cargo_toml)?;
        config.apply_package_fallbacks(package);
    }

    discover_icons(project_dir, &mut config.icons);

    Ok(config)
}

impl ReleaseConfig {
    /// Fills unset product and repository fields from Cargo.toml metadata.
    pub fn apply_package_fallbacks(&mut self, package: PackageMetadata) {
        let product = &mut self.product;
        if product.slug.is_none() {
            product.slug = package.name.clone();
        }
        if product.binary.is_none() {
            product.binary = package.binary_name.or_else(|| product.slug.clone());
        }
        if product.name.is_none() {
            product.name = product.slug.clone();
        }
        if product.description.is_none() {
            product.description = package.description;
        }
        if self.repository.url.is_none() {
            self.repository.url = package.repository;
        }
    }

    /// Converts the configuration into a settings builder.
    ///
    /// # Errors
    ///
    /// Fails when the slug or identifier cannot be determined.
    pub fn into_settings_builder(self, project_dir: &Path) -> Result<SettingsBuilder> {
        let slug = self.product.slug.ok_or_else(|| {
            ReleaseError::Cli(CliError::InvalidArguments {
                reason: "product.slug is not set and no Cargo.toml package name was found"
                    .to_string(),
            })
        })?;
        let identifier = self.product.identifier.ok_or_else(|| {
            ReleaseError::Cli(CliError::InvalidArguments {
                reason: format!("product.identifier is required in {}", DEFAULT_CONFIG_FILE),
            })
        })?;

        let product = ProductSettings {
            name: self.product.name.unwrap_or_else(|| slug.clone()),
            binary: self.product.binary.unwrap_or_else(|| slug.clone()),
            description: self.product.description.unwrap_or_default(),
            slug,
            identifier,
        };

        let mut builder = SettingsBuilder::new()
            .project_dir(project_dir)
            .product(product)
            .icons(self.icons)
            .formats(self.formats)
            .tools(self.tools)
            .signing(self.signing);

        if let Some(url) = self.repository.url {
            builder = builder.repository_url(url);
        }
        if let Some(target_dir) = self.build.target_dir {
            builder = builder.target_dir(target_dir);
        }
        if let Some(version_env) = self.build.version_env {
            builder = builder.version_env(version_env);
        }

        Ok(builder)
    }
}

/// Reads package metadata from Cargo.toml.
pub fn load_package_metadata(cargo_toml_path: &Path) -> Result<PackageMetadata> {
    let manifest = std::fs::read_to_string(cargo_toml_path).map_err(|e| {
        ReleaseError::Cli(CliError::ExecutionFailed {
            command: "read_cargo_toml".to_string(),
            reason: format!("Failed to read {}: {}", cargo_toml_path.display(), e),
        })
    })?;

    let toml_value: toml::Value = toml::from_str(&manifest)?;

    // Workspace roots have no [package]; nothing to fall back to.
    let Some(package) = toml_value.get("package") else {
        return Ok(PackageMetadata::default());
    };

    let string = |key: &str| {
        package
            .get(key)
            .and_then(|v| v.as_str())
            .map(String::from)
    };

    // Try [[bin]] section first
    let binary_name = toml_value
        .get("bin")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|first| first.get("name"))
        .and_then(|v| v.as_str())
        .map(String::from)
        .or_else(|| string("name"));

    Ok(PackageMetadata {
        name: string("name"),
        description: string("description"),
        repository: string("repository"),
        binary_name,
    })
}

/// Discover icons from the conventional `assets/img/` directory for every
/// platform whose icon list is empty.
///
/// - icon.icns (macOS)
/// - icon.ico (Windows)
/// - icon_*x*.png (Linux - fixed sizes)
fn discover_icons(project_dir: &Path, icons: &mut IconSettings) {
    let assets_dir = project_dir.join("assets").join("img");
    if !assets_dir.is_dir() {
        log::debug!("Assets directory not found: {}", assets_dir.display());
        return;
    }

    if icons.macos.is_empty() {
        let icns = assets_dir.join("icon.icns");
        if icns.is_file() {
            log::info!("Found macOS icon: {}", icns.display());
            icons.macos.push(icns);
        }
    }

    if icons.windows.is_empty() {
        let ico = assets_dir.join("icon.ico");
        if ico.is_file() {
            log::info!("Found Windows icon: {}", ico.display());
            icons.windows.push(ico);
        }
    }

    if icons.linux.is_empty() && icons.linux_source.is_none() {
        for size in [32, 64, 128, 256, 512] {
            let png = assets_dir.join(format!("icon_{size}x{size}.png"));
            if png.is_file() {
                log::debug!("Found Linux icon: {}", png.display());
                icons.linux.push(png);
            }
        }
        if !icons.linux.is_empty() {
            log::info!("Found {} Linux PNG icons", icons.linux.len());
        }
    }
}
