//! Release packaging pipeline.
//!
//! Turns a version tag into canonically named, optionally signed release
//! artifacts for one platform by driving external tools: compiler, strip,
//! fusion tool, packager, archiver and signer.
//!
//! # Module Organization
//!
//! - [`artifact`] - [`ReleaseArtifact`] records
//! - [`builder`] - the [`ReleasePipeline`] and its steps
//! - [`error`] - pipeline error type
//! - [`platform`] - per-platform variation
//! - [`settings`] - configuration and [`SettingsBuilder`]
//! - [`utils`] - file and process helpers

pub mod artifact;
pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;
mod version;

pub use artifact::{ArtifactKind, ReleaseArtifact};
pub use builder::{ManifestEntry, PackagerConfig, ReleaseOutcome, ReleasePipeline, UpdateManifest};
pub use error::{Error, Result};
pub use platform::Platform;
pub use settings::{
    Arch, FormatSettings, IconSettings, ProductSettings, Settings, SettingsBuilder,
    SigningSettings, ToolCommand, ToolSettings,
};
pub use version::normalize_version;
