//! Release pipeline orchestration.
//!
//! This module provides the [`ReleasePipeline`] orchestrator that runs one
//! platform's release from compilation to update manifest.
//!
//! # Overview
//!
//! The pipeline:
//! 1. Compiles, fuses and strips the binary, then stages it
//! 2. Runs the external packager with a generated configuration
//! 3. Renames packager output to canonical artifact names
//! 4. In signed mode: signs each artifact, writes the update manifest and
//!    deletes the signature sidecars
//!
//! # Example
//!
//! ```no_run
//! use release_packager::bundler::{Platform, ProductSettings, ReleasePipeline, SettingsBuilder};
//!
//! # async fn example() -> release_packager::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .platform(Platform::Linux)
//!     .version("v2.5.0")
//!     .repository_url("https://github.com/example/launcher")
//!     .product(ProductSettings {
//!         name: "Launcher".into(),
//!         slug: "launcher".into(),
//!         identifier: "com.example.launcher".into(),
//!         binary: "launcher".into(),
//!         ..Default::default()
//!     })
//!     .build()?;
//!
//! let outcome = ReleasePipeline::new(settings).run().await?;
//! for artifact in &outcome.artifacts {
//!     println!("{} {}", artifact.kind, artifact.path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA-1 checksum calculation for artifacts
//! - [`compile`] - compile, fuse, strip and stage the binary
//! - [`manifest`] - update manifest types and generation
//! - [`orchestrator`] - Main [`ReleasePipeline`] struct
//! - [`packager`] - packager configuration and invocation
//! - [`signing`] - detached signing and sidecar handling
//! - [`tool_detection`] - External tool availability checking

pub mod checksum;
pub mod compile;
pub mod manifest;
mod orchestrator;
pub mod packager;
pub mod signing;
pub mod tool_detection;

pub use manifest::{ManifestEntry, UpdateManifest};
pub use orchestrator::{ReleaseOutcome, ReleasePipeline};
pub use packager::{PackagerBinary, PackagerConfig};
