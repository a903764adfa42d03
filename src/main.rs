//! Release Packager - builds, packages and signs desktop releases.
//!
//! Produces canonically named artifacts in the output directory and, when a
//! signing key is present, an update manifest for the in-app updater.

use release_packager::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
