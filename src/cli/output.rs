//! Terminal output for the release CLI.
//!
//! Progress goes to stdout, warnings to stderr. `quiet` suppresses both.
//! Colors are only emitted when the stream is a terminal.

use cyrup_termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{self, IsTerminal, Write};

/// Writes user-facing progress messages.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

#[derive(Clone, Copy)]
enum Target {
    Stdout,
    Stderr,
}

impl Target {
    fn stream(self) -> StandardStream {
        let (is_terminal, open): (bool, fn(ColorChoice) -> StandardStream) = match self {
            Target::Stdout => (io::stdout().is_terminal(), StandardStream::stdout),
            Target::Stderr => (io::stderr().is_terminal(), StandardStream::stderr),
        };
        open(if is_terminal {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        })
    }
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Whether verbose output is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Writes `prefix` in `color`, then `message` unstyled.
    fn styled(
        &self,
        target: Target,
        color: Option<Color>,
        bold: bool,
        prefix: &str,
        message: &str,
    ) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stream = target.stream();
        stream.set_color(ColorSpec::new().set_fg(color).set_bold(bold))?;
        write!(stream, "{prefix}")?;
        stream.reset()?;
        writeln!(stream, "{message}")
    }

    /// Prints a section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        self.styled(Target::Stdout, Some(Color::Cyan), true, "\n==> ", title)
    }

    /// Prints a progress step.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.styled(Target::Stdout, Some(Color::Blue), false, "  -> ", message)
    }

    /// Prints a success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.styled(Target::Stdout, Some(Color::Green), true, "  ✓ ", message)
    }

    /// Prints an indented detail line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.styled(Target::Stdout, None, false, "     ", message)
    }

    /// Prints only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.is_verbose() {
            return Ok(());
        }
        self.styled(Target::Stdout, Some(Color::White), false, "     ", message)
    }

    /// Prints a warning to stderr unless quiet.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.styled(Target::Stderr, Some(Color::Yellow), true, "warning: ", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbose() {
        assert!(!OutputManager::new(true, true).is_verbose());
        assert!(OutputManager::new(true, false).is_verbose());
    }

    #[test]
    fn quiet_suppresses_everything() {
        let output = OutputManager::new(false, true);
        output.section("Artifacts").unwrap();
        output.warn("unsigned").unwrap();
    }
}
