//! Compile, fuse, strip and stage the release binary.
//!
//! Every step is an external tool. The compiler sees the normalized version
//! through the version-broadcast variable so the application can embed it.

use crate::{
    bail,
    bundler::{
        Result, Settings,
        error::Context,
        utils::{fs, process::run_tool},
    },
};
use std::path::{Path, PathBuf};

/// Builds the release binary and stages it under its canonical name.
///
/// # Process
///
/// 1. Compile once per target triple of the platform
/// 2. Fuse the per-architecture binaries when there is more than one (macOS)
/// 3. Strip debug symbols
/// 4. Move the result to [`Settings::staged_binary_path`]
///
/// # Returns
///
/// Path of the staged binary.
pub async fn build_release_binary(settings: &Settings) -> Result<PathBuf> {
    let mut built = Vec::new();
    for target in settings.platform().target_triples() {
        compile(settings, target).await?;

        let binary = settings.compiled_binary_path(target);
        if !binary.is_file() {
            bail!(
                "compiler finished but {} does not exist",
                binary.display()
            );
        }
        built.push(binary);
    }

    let binary = match built.as_slice() {
        [single] => single.clone(),
        _ => fuse(settings, &built).await?,
    };

    strip(settings, &binary).await?;

    let staged = settings.staged_binary_path();
    fs::move_file(&binary, &staged).await?;
    log::info!("Staged binary at {}", staged.display());

    Ok(staged)
}

/// Invokes the compiler for one target triple.
async fn compile(settings: &Settings, target: &str) -> Result<()> {
    log::info!("Compiling {} for {}", settings.product().binary, target);

    let mut command = settings.tools().compiler().command();
    command
        .args(["build", "--release", "--target", target, "--bin"])
        .arg(&settings.product().binary)
        .env(settings.version_env(), settings.version())
        .env("CARGO_TARGET_DIR", settings.target_dir())
        .current_dir(settings.project_dir());

    run_tool(&mut command)
        .await
        .with_context(|| format!("compiling for {target}"))
}

/// Fuses per-architecture binaries into one multi-architecture binary.
async fn fuse(settings: &Settings, inputs: &[PathBuf]) -> Result<PathBuf> {
    let fused_target = settings
        .platform()
        .fused_target()
        .context("platform does not produce fused binaries")?;
    let output = settings
        .target_dir()
        .join(fused_target)
        .join("release")
        .join(&settings.product().binary);
    let output_dir = output
        .parent()
        .context("fused binary path has no parent directory")?;
    fs::create_dir_all(output_dir).await?;

    log::info!("Fusing {} architectures into {}", inputs.len(), output.display());

    let mut command = settings.tools().fuse().command();
    command.arg("-create").arg("-output").arg(&output).args(inputs);
    run_tool(&mut command).await?;

    if !output.is_file() {
        bail!("fusion tool did not produce {}", output.display());
    }
    Ok(output)
}

/// Removes debug symbols in place.
async fn strip(settings: &Settings, binary: &Path) -> Result<()> {
    log::info!("Stripping {}", binary.display());

    let mut command = settings.tools().strip(settings.platform()).command();
    command.arg(binary);
    run_tool(&mut command).await
}
