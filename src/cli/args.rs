//! Command line argument parsing and validation.

use crate::bundler::Platform;
use clap::Parser;
use std::path::PathBuf;

/// Release packaging pipeline for Rust desktop applications
#[derive(Parser, Debug)]
#[command(
    name = "release_packager",
    version,
    about = "Build, package, sign and publish-prepare release artifacts",
    long_about = "Compiles the release binary, runs the platform packager, renames every output
to a canonical file name and, when a signing key is present, signs the artifacts
and writes an update manifest.

Usage:
  release_packager v2.5.0
  release_packager --platform windows 3.0.0
  CARGO_PACKAGER_SIGN_PRIVATE_KEY=... release_packager -C ./launcher 2.5.0

Without CARGO_PACKAGER_SIGN_PRIVATE_KEY the run is unsigned and no manifest is written."
)]
pub struct Args {
    /// Release version, with or without a leading `v`
    #[arg(id = "release_version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Target platform (defaults to the host)
    #[arg(short, long, value_enum, value_name = "PLATFORM")]
    pub platform: Option<Platform>,

    /// Release configuration file (defaults to <project>/Release.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Project root
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Directory receiving the final artifacts (defaults to <project>/dist)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip checking that external tools are installed
    #[arg(long)]
    pub skip_preflight: bool,

    /// Print detailed progress
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the version argument if it is present and not blank.
    pub fn version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty() && *v != "v")
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.project_dir.as_os_str().is_empty() {
            return Err("Project directory cannot be empty".to_string());
        }

        if let Some(output_dir) = &self.output_dir
            && output_dir.as_os_str().is_empty()
        {
            return Err("Output directory cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);

        Self { output }
    }
}

impl RuntimeConfig {
    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
