//! macOS release artifacts: disk image and archived universal app bundle.
//!
//! The staged universal binary only feeds the packager. The portable macOS
//! artifact is the `.app` bundle, archived with the external archiver.

use super::{promote, resolve_output};
use crate::{
    bail,
    bundler::{
        ArtifactKind, ReleaseArtifact, Settings,
        error::{Context, Result},
        utils::{fs, process::run_tool},
    },
};

/// Renames the packager's `.dmg` and archives its `.app` bundle.
pub async fn collect_artifacts(settings: &Settings) -> Result<Vec<ReleaseArtifact>> {
    let mut artifacts = Vec::new();

    for format in settings.formats() {
        let artifact = match format.as_str() {
            "dmg" => {
                let output = resolve_output(settings, "*.dmg")?;
                promote(settings, &output, ArtifactKind::DiskImage, None, ".dmg").await?
            }
            "app" => archive_app_bundle(settings).await?,
            other => bail!("Unsupported macOS package format: {}", other),
        };
        artifacts.push(artifact);
    }

    Ok(artifacts)
}

/// Archives `<ProductName>.app` into `<Product>-macOS-<v>-Universal-Portable.app.tar.gz`.
async fn archive_app_bundle(settings: &Settings) -> Result<ReleaseArtifact> {
    let app_bundle = resolve_output(settings, "*.app")?;
    if !app_bundle.is_dir() {
        bail!("{} is not an app bundle directory", app_bundle.display());
    }

    let bundle_name = app_bundle
        .file_name()
        .context("app bundle path has no file name")?;
    let bundle_dir = app_bundle
        .parent()
        .context("app bundle path has no parent directory")?;

    let arch = settings.arch();
    let archive_name = settings.canonical_file_name(Some(arch), Some("Portable"), ".app.tar.gz");
    let archive_path = settings.output_dir().join(&archive_name);
    fs::remove_file_if_exists(&archive_path).await?;

    log::info!("Archiving {}", app_bundle.display());
    let mut command = settings.tools().archiver().command();
    command
        .arg("-czf")
        .arg(&archive_path)
        .arg("-C")
        .arg(bundle_dir)
        .arg(bundle_name);
    run_tool(&mut command).await?;

    if !archive_path.is_file() {
        bail!("archiver did not produce {}", archive_path.display());
    }
    log::info!("✓ {} -> {}", app_bundle.display(), archive_name);

    Ok(ReleaseArtifact::new(
        settings.platform(),
        arch,
        ArtifactKind::Archive,
        archive_path,
        settings.version(),
    ))
}
