//! Main release pipeline orchestration.
//!
//! This module provides the [`ReleasePipeline`] orchestrator that runs every
//! step of a platform release in order.

use super::{
    compile::build_release_binary,
    manifest::{self, UpdateManifest},
    packager::{self, PackagerConfig},
    signing::{self, SigningKey},
    tool_detection,
};
use crate::bundler::{
    ReleaseArtifact, Result, Settings,
    error::Error,
    utils::fs,
};
use std::path::PathBuf;

/// Result of a completed release run.
#[derive(Debug, Clone)]
pub struct ReleaseOutcome {
    /// Canonically named artifacts, in creation order.
    pub artifacts: Vec<ReleaseArtifact>,
    /// The update manifest, present only in signed mode.
    pub manifest: Option<UpdateManifest>,
    /// Where the manifest was written.
    pub manifest_path: Option<PathBuf>,
}

/// Main release orchestrator.
///
/// Runs strictly sequentially: every external tool must exit before the next
/// step starts, and the first failure aborts the run without cleaning up
/// files that were already produced.
///
/// # Modes
///
/// - **Unsigned** (signing key variable unset): build, package, rename.
/// - **Signed**: additionally sign every artifact, write
///   `update_manifest_<platform>.json` and delete the `.sig` sidecars.
#[derive(Debug)]
pub struct ReleasePipeline {
    settings: Settings,
    preflight: bool,
}

impl ReleasePipeline {
    /// Creates a pipeline with tool preflight enabled.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            preflight: true,
        }
    }

    /// Enables or disables the `which` check run before the first tool.
    pub fn preflight(mut self, enabled: bool) -> Self {
        self.preflight = enabled;
        self
    }

    /// Runs the release.
    ///
    /// # Returns
    ///
    /// The canonical artifacts and, in signed mode, the update manifest.
    pub async fn run(&self) -> Result<ReleaseOutcome> {
        let settings = &self.settings;
        let signing_key = SigningKey::from_env(settings.signing());

        if signing_key.is_some() && settings.repository_url().is_none() {
            return Err(Error::Config(
                "repository.url is required for signed releases".to_string(),
            ));
        }

        if self.preflight {
            tool_detection::preflight(settings, signing_key.is_some())?;
        }

        log::info!(
            "Releasing {} {} for {} ({})",
            settings.product_name(),
            settings.version(),
            settings.platform(),
            if signing_key.is_some() { "signed" } else { "unsigned" }
        );

        fs::create_dir_all(settings.output_dir()).await?;

        // A manifest from an earlier run would describe artifacts about to be replaced.
        let stale_manifest = settings
            .output_dir()
            .join(manifest::manifest_file_name(settings.platform()));
        fs::remove_file_if_exists(&stale_manifest).await?;

        let staged = build_release_binary(settings).await?;

        let icons = packager::prepare_icons(settings).await?;
        let config = PackagerConfig::new(settings, &staged, icons);
        packager::run_packager(settings, &config).await?;

        let mut artifacts = settings.platform().collect_artifacts(settings).await?;
        signing::remove_signatures(artifacts.iter().map(|a| a.path.as_path())).await?;

        let Some(key) = signing_key else {
            log::warn!(
                "{} not set: skipping signing and update manifest",
                settings.signing().key_env
            );
            return Ok(ReleaseOutcome {
                artifacts,
                manifest: None,
                manifest_path: None,
            });
        };

        for artifact in &artifacts {
            signing::sign_artifact(settings, &key, &artifact.path).await?;
        }

        let manifest = manifest::build_manifest(settings, &mut artifacts).await?;
        let manifest_path = manifest::write_manifest(settings, &manifest).await?;

        signing::remove_signatures(artifacts.iter().map(|a| a.path.as_path())).await?;

        Ok(ReleaseOutcome {
            artifacts,
            manifest: Some(manifest),
            manifest_path: Some(manifest_path),
        })
    }
}
