//! External packager configuration and invocation.
//!
//! The packager receives a declarative JSON configuration and writes its
//! platform packages into the output directory. The signing key is removed
//! from its environment so it never signs on its own; signing is a separate
//! pipeline step.

use crate::{
    bail,
    bundler::{
        Platform, Result, Settings,
        error::{Context, ErrorExt},
        utils::{fs, process::run_tool},
    },
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Edge length of the PNG rasterized from the Linux icon source.
const RASTER_ICON_SIZE: u32 = 256;

/// A binary handed to the packager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagerBinary {
    /// Absolute path of the binary.
    pub path: PathBuf,
    /// Whether this is the application entry point.
    pub main: bool,
}

/// Configuration written for the external packager (camelCase JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagerConfig {
    /// Internal slug; the packager embeds it in output file names.
    pub name: String,
    /// Display name.
    pub product_name: String,
    /// Reverse-domain identifier.
    pub identifier: String,
    /// Normalized version.
    pub version: String,
    /// Short description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Requested package formats.
    pub formats: Vec<String>,
    /// Where packages are written.
    pub out_dir: PathBuf,
    /// Binaries to package, exactly one marked main.
    pub binaries: Vec<PackagerBinary>,
    /// Platform icon files.
    pub icons: Vec<PathBuf>,
}

impl PackagerConfig {
    /// Builds the configuration for a staged binary and resolved icon set.
    pub fn new(settings: &Settings, staged_binary: &Path, icons: Vec<PathBuf>) -> Self {
        let product = settings.product();
        Self {
            name: product.slug.clone(),
            product_name: product.name.clone(),
            identifier: product.identifier.clone(),
            version: settings.version().to_string(),
            description: product.description.clone(),
            formats: settings.formats(),
            out_dir: settings.output_dir().to_path_buf(),
            binaries: vec![PackagerBinary {
                path: staged_binary.to_path_buf(),
                main: true,
            }],
            icons,
        }
    }
}

/// Resolves the icon set, rasterizing the Linux icon source when configured.
pub async fn prepare_icons(settings: &Settings) -> Result<Vec<PathBuf>> {
    let source = match (settings.platform(), &settings.icon_settings().linux_source) {
        (Platform::Linux, Some(source)) => source,
        _ => return Ok(settings.icons().to_vec()),
    };

    let png = settings
        .staging_dir()
        .join(format!("{}.png", settings.slug()));
    fs::create_dir_all(&settings.staging_dir()).await?;

    log::info!("Rasterizing {} to {}", source.display(), png.display());
    let size = RASTER_ICON_SIZE.to_string();
    let mut command = settings.tools().rasterizer().command();
    command
        .args(["-w", size.as_str(), "-h", size.as_str(), "-o"])
        .arg(&png)
        .arg(source);
    run_tool(&mut command).await?;

    if !png.is_file() {
        bail!("rasterizer did not produce {}", png.display());
    }
    Ok(vec![png])
}

/// Writes the configuration and runs the packager.
///
/// # Returns
///
/// Path of the written configuration file.
pub async fn run_packager(settings: &Settings, config: &PackagerConfig) -> Result<PathBuf> {
    let config_path = settings.staging_dir().join("packager.json");
    fs::create_dir_all(&settings.staging_dir()).await?;
    fs::create_dir_all(settings.output_dir()).await?;

    let json = serde_json::to_vec_pretty(config)?;
    tokio::fs::write(&config_path, json)
        .await
        .fs_context("writing packager config", &config_path)?;

    log::info!(
        "Packaging {} as {}",
        config.product_name,
        config.formats.join(", ")
    );

    let signing = settings.signing();
    let mut command = settings.tools().packager().command();
    command
        .arg("--config")
        .arg(&config_path)
        .env_remove(&signing.key_env)
        .env_remove(&signing.password_env)
        .current_dir(settings.project_dir());

    run_tool(&mut command)
        .await
        .context("running packager")?;

    Ok(config_path)
}
