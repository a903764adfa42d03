//! External tool availability checking.
//!
//! Resolves every program a platform run needs before the first invocation,
//! so a missing tool fails fast instead of after a long compile.

use crate::bundler::{Result, Settings, ToolCommand, error::Error};

/// Checks that every tool the run will invoke can be found.
///
/// # Errors
///
/// Returns [`Error::ToolNotFound`] for the first program `which` cannot resolve.
pub fn preflight(settings: &Settings, signing: bool) -> Result<()> {
    let tools = settings.platform().required_tools(settings, signing);
    for tool in &tools {
        check_tool(tool)?;
    }
    log::debug!("All {} required tools available", tools.len());
    Ok(())
}

fn check_tool(tool: &ToolCommand) -> Result<()> {
    match which::which(&tool.program) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool.program, path.display());
            Ok(())
        }
        Err(e) => Err(Error::ToolNotFound {
            tool: tool.program.clone(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_program_is_reported() {
        let err = check_tool(&ToolCommand::new("release-packager-no-such-tool")).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { ref tool, .. } if tool == "release-packager-no-such-tool"));
        assert_eq!(err.tool_exit_code(), Some(127));
    }

    #[cfg(unix)]
    #[test]
    fn absolute_paths_resolve() {
        check_tool(&ToolCommand::new("/bin/sh")).unwrap();
    }
}
