//! Error types for release pipeline operations.
//!
//! Every failure is fatal to the run. [`Error::ToolFailed`] carries the exit
//! code of the external tool so the binary can propagate it unchanged.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error as DeriveError;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while running the release pipeline.
#[derive(Debug, DeriveError)]
pub enum Error {
    /// Free-form failure.
    #[error("{0}")]
    GenericError(String),

    /// Raw I/O failure without path context.
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// I/O failure on a known path.
    #[error("{context} ({}): {source}", path.display())]
    Fs {
        /// What was being attempted
        context: String,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// An external tool could not be started at all.
    #[error("failed to execute `{command}`: {error}")]
    CommandFailed {
        /// Program that failed to spawn
        command: String,
        /// Spawn error
        error: io::Error,
    },

    /// An external tool ran and exited unsuccessfully.
    #[error("`{command}` failed with exit code {}", code.map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string()))]
    ToolFailed {
        /// Command line that failed
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// A required tool is not on PATH.
    #[error("required tool `{tool}` not found: {reason}")]
    ToolNotFound {
        /// Program name as configured
        tool: String,
        /// Lookup failure
        reason: String,
    },

    /// The packager produced nothing matching the expected pattern.
    #[error("no packager output matches `{pattern}`")]
    MissingOutput {
        /// Glob pattern that matched nothing
        pattern: String,
    },

    /// The packager produced several files that could be the artifact.
    #[error("packager output `{pattern}` is ambiguous: {candidates:?}")]
    AmbiguousOutput {
        /// Glob pattern
        pattern: String,
        /// All remaining candidates
        candidates: Vec<PathBuf>,
    },

    /// The signer exited successfully but left no sidecar behind.
    #[error("signer did not produce {}", .0.display())]
    MissingSignature(PathBuf),

    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid glob pattern.
    #[error("glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// Invalid repository URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Exit code of the failing external tool, if that is what failed.
    pub fn tool_exit_code(&self) -> Option<i32> {
        match self {
            Error::ToolFailed { code, .. } => Some(code.unwrap_or(1)),
            Error::ToolNotFound { .. } => Some(127),
            _ => None,
        }
    }
}

/// Attach path context to I/O results.
pub trait ErrorExt<T> {
    /// Wraps the error with an action description and the path involved.
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Attach a message to `Option`s and pipeline results.
pub trait Context<T> {
    /// Adds a static context message.
    fn context<C: Display>(self, context: C) -> Result<T>;

    /// Adds a lazily built context message.
    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

impl<T> Context<T> for Result<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| match e {
            // Keep tool failures intact so their exit code survives.
            e @ (Error::ToolFailed { .. } | Error::ToolNotFound { .. }) => e,
            e => Error::GenericError(format!("{context}: {e}")),
        })
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|e| match e {
            e @ (Error::ToolFailed { .. } | Error::ToolNotFound { .. }) => e,
            e => Error::GenericError(format!("{}: {e}", f())),
        })
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_failure_keeps_its_exit_code_through_context() {
        let failed: Result<()> = Err(Error::ToolFailed {
            command: "strip target/app".into(),
            code: Some(3),
        });
        let err = failed.context("stripping binary").unwrap_err();
        assert_eq!(err.tool_exit_code(), Some(3));
    }

    #[test]
    fn signal_termination_maps_to_one() {
        let err = Error::ToolFailed {
            command: "lipo".into(),
            code: None,
        };
        assert_eq!(err.tool_exit_code(), Some(1));
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn fs_context_names_the_path() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = res.fs_context("reading artifact", "/tmp/x").unwrap_err();
        assert!(err.to_string().starts_with("reading artifact (/tmp/x)"));
        assert_eq!(err.tool_exit_code(), None);
    }
}
