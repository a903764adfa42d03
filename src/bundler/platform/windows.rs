//! Windows release artifacts: portable `.exe` and NSIS installer.

use super::{promote, resolve_output};
use crate::{
    bail,
    bundler::{ArtifactKind, ReleaseArtifact, Settings, error::Result},
};

/// Renames the staged `.exe` and the packager's NSIS setup executable.
pub async fn collect_artifacts(settings: &Settings) -> Result<Vec<ReleaseArtifact>> {
    let mut artifacts = vec![
        promote(
            settings,
            &settings.staged_binary_path(),
            ArtifactKind::PortableExecutable,
            Some("Portable"),
            ".exe",
        )
        .await?,
    ];

    for format in settings.formats() {
        match format.as_str() {
            "nsis" => {
                let output =
                    resolve_output(settings, &format!("{}_*-setup.exe", settings.slug()))?;
                artifacts.push(
                    promote(settings, &output, ArtifactKind::InstallerPackage, Some("Setup"), ".exe")
                        .await?,
                );
            }
            other => bail!("Unsupported Windows package format: {}", other),
        }
    }

    Ok(artifacts)
}
