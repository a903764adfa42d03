//! Release packaging pipeline for Rust desktop applications
//!
//! This library drives one platform release end to end:
//! - compile the release binary (and fuse per-arch builds on macOS)
//! - run the packager (AppImage, .deb, .dmg, .app, NSIS setup)
//! - rename every output to a canonical, version-stamped file name
//! - optionally sign the artifacts and write an update manifest
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, ReleaseError, Result};
