//! Command line interface for the release packager.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::bundler::{ReleaseOutcome, ReleasePipeline};
use crate::error::{CliError, Result};
use crate::metadata::load_release_config;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let runtime = RuntimeConfig::from(&args);
    execute(&args, &runtime).await
}

/// Runs the release described by `args`.
///
/// The version is checked before any configuration is read or any tool is
/// started.
pub async fn execute(args: &Args, runtime: &RuntimeConfig) -> Result<i32> {
    let version = args.version().ok_or(CliError::MissingVersion)?;

    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = load_release_config(&args.project_dir, args.config.as_deref())?;
    let mut builder = config
        .into_settings_builder(&args.project_dir)?
        .version(version);
    if let Some(platform) = args.platform {
        builder = builder.platform(platform);
    }
    if let Some(output_dir) = &args.output_dir {
        builder = builder.output_dir(output_dir);
    }
    let settings = builder.build()?;

    runtime.section(&format!(
        "Releasing {} {} for {}",
        settings.product_name(),
        settings.version(),
        settings.platform().display_name()
    ))?;
    runtime.verbose_println(&format!("Project: {}", settings.project_dir().display()))?;
    runtime.verbose_println(&format!("Output: {}", settings.output_dir().display()))?;

    if args.skip_preflight {
        runtime.warn("Skipping external tool preflight")?;
    } else {
        runtime.progress("Checking external tools")?;
    }

    let pipeline = ReleasePipeline::new(settings).preflight(!args.skip_preflight);
    let outcome = pipeline.run().await?;

    report(runtime, &outcome)?;
    Ok(0)
}

fn report(runtime: &RuntimeConfig, outcome: &ReleaseOutcome) -> Result<()> {
    runtime.section("Artifacts")?;
    for artifact in &outcome.artifacts {
        runtime.success(&format!("{} ({})", artifact.path.display(), artifact.kind))?;
        if let (Some(size), Some(sha1)) = (artifact.size_bytes, &artifact.checksum) {
            runtime.indent(&format!("{size} bytes, sha1 {sha1}"))?;
        }
    }

    match &outcome.manifest_path {
        Some(path) => runtime.success(&format!("Update manifest: {}", path.display()))?,
        None => runtime.warn("Unsigned build: no update manifest was written")?,
    }
    Ok(())
}
