//! Linux release artifacts: portable binary, AppImage and Debian package.

use super::{promote, resolve_output};
use crate::{
    bail,
    bundler::{ArtifactKind, ReleaseArtifact, Settings, error::Result},
};

/// Renames the staged binary and the packager's `.AppImage`/`.deb` output.
///
/// | Source | Canonical name |
/// |---|---|
/// | staged `<slug>` | `<Product>-Linux-<v>-x86_64-Portable` |
/// | `<slug>_*.AppImage` | `<Product>-Linux-<v>-x86_64.AppImage` |
/// | `<slug>_*.deb` | `<Product>-Linux-<v>-x86_64.deb` |
pub async fn collect_artifacts(settings: &Settings) -> Result<Vec<ReleaseArtifact>> {
    let mut artifacts = vec![
        promote(
            settings,
            &settings.staged_binary_path(),
            ArtifactKind::PortableExecutable,
            Some("Portable"),
            "",
        )
        .await?,
    ];

    for format in settings.formats() {
        let artifact = match format.as_str() {
            "appimage" => {
                let output = resolve_output(settings, &format!("{}_*.AppImage", settings.slug()))?;
                promote(settings, &output, ArtifactKind::DiskImage, None, ".AppImage").await?
            }
            "deb" => {
                let output = resolve_output(settings, &format!("{}_*.deb", settings.slug()))?;
                promote(settings, &output, ArtifactKind::InstallerPackage, None, ".deb").await?
            }
            other => bail!("Unsupported Linux package format: {}", other),
        };
        artifacts.push(artifact);
    }

    Ok(artifacts)
}
