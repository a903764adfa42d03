//! External process execution.
//!
//! Tools inherit stdout/stderr so their own diagnostics reach the user
//! unchanged. A non-zero exit becomes [`Error::ToolFailed`] carrying the code.

use crate::bundler::error::{Error, Result};
use tokio::process::Command;

/// Runs a command to completion and fails on a non-zero exit status.
pub async fn run_tool(command: &mut Command) -> Result<()> {
    let description = describe(command);
    log::debug!("Running: {}", description);

    let status = command.status().await.map_err(|error| Error::CommandFailed {
        command: program_name(command),
        error,
    })?;

    if !status.success() {
        log::error!("{} exited with {:?}", description, status.code());
        return Err(Error::ToolFailed {
            command: description,
            code: status.code(),
        });
    }

    Ok(())
}

/// Renders the command line for logs and error messages.
pub fn describe(command: &Command) -> String {
    let std = command.as_std();
    let mut parts = vec![std.get_program().to_string_lossy().into_owned()];
    parts.extend(std.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

fn program_name(command: &Command) -> String {
    command.as_std().get_program().to_string_lossy().into_owned()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn propagates_exit_code() {
        let mut command = Command::new("sh");
        command.args(["-c", "exit 7"]);
        let err = run_tool(&mut command).await.unwrap_err();
        assert_eq!(err.tool_exit_code(), Some(7));
        assert!(err.to_string().contains("sh -c exit 7"));
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_failure() {
        let mut command = Command::new("/nonexistent/definitely-not-a-tool");
        let err = run_tool(&mut command).await.unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn success_is_ok() {
        run_tool(&mut Command::new("true")).await.unwrap();
    }
}
