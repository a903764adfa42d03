//! Configuration structures for release runs.
//!
//! This module provides the product metadata, toolchain, icon, format and
//! signing configuration for a platform release, plus the builder that
//! resolves them into a [`Settings`] value.

mod arch;
mod builder;
mod bundle;
mod core;
mod package;
mod tools;

// Re-export all public types
pub use arch::Arch;
pub use builder::SettingsBuilder;
pub use bundle::{FormatSettings, IconSettings, SigningSettings};
pub use core::Settings;
pub use package::ProductSettings;
pub use tools::{ToolCommand, ToolSettings};
