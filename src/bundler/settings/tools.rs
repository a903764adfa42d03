//! External tool commands.
//!
//! Each tool is a program plus leading arguments. The pipeline appends the
//! step-specific arguments itself, so `program = "cross"` or a wrapper script
//! work the same as the defaults.

use crate::bundler::platform::Platform;

/// A configurable external program with leading arguments.
///
/// ```toml
/// [tools.packager]
/// program = "cargo"
/// args = ["packager", "--release"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolCommand {
    /// Program name or path.
    pub program: String,

    /// Arguments placed before the step-specific ones.
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolCommand {
    /// A tool with no leading arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// A tool with leading arguments.
    pub fn with_args<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a process command preloaded with the leading arguments.
    pub fn command(&self) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

/// Overrides for the external toolchain. Unset entries use platform defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolSettings {
    /// Compiler driver. Default: `cargo`.
    pub compiler: Option<ToolCommand>,

    /// Symbol stripper. Default: `strip`, or `x86_64-w64-mingw32-strip` for Windows.
    pub strip: Option<ToolCommand>,

    /// Multi-architecture fusion tool (macOS). Default: `lipo`.
    pub fuse: Option<ToolCommand>,

    /// Installer generator. Default: `cargo packager --release`.
    pub packager: Option<ToolCommand>,

    /// Detached signer. Default: `cargo packager signer sign`.
    pub signer: Option<ToolCommand>,

    /// Archiver for the macOS app bundle. Default: `tar`.
    pub archiver: Option<ToolCommand>,

    /// Vector-to-raster icon exporter (Linux). Default: `inkscape`.
    pub rasterizer: Option<ToolCommand>,
}

impl ToolSettings {
    /// Compiler driver.
    pub fn compiler(&self) -> ToolCommand {
        self.compiler
            .clone()
            .unwrap_or_else(|| ToolCommand::new("cargo"))
    }

    /// Symbol stripper for the given platform.
    pub fn strip(&self, platform: Platform) -> ToolCommand {
        self.strip.clone().unwrap_or_else(|| match platform {
            Platform::Windows => ToolCommand::new("x86_64-w64-mingw32-strip"),
            Platform::Linux | Platform::MacOs => ToolCommand::new("strip"),
        })
    }

    /// Binary fusion tool.
    pub fn fuse(&self) -> ToolCommand {
        self.fuse.clone().unwrap_or_else(|| ToolCommand::new("lipo"))
    }

    /// Installer generator.
    pub fn packager(&self) -> ToolCommand {
        self.packager
            .clone()
            .unwrap_or_else(|| ToolCommand::with_args("cargo", ["packager", "--release"]))
    }

    /// Detached signer.
    pub fn signer(&self) -> ToolCommand {
        self.signer
            .clone()
            .unwrap_or_else(|| ToolCommand::with_args("cargo", ["packager", "signer", "sign"]))
    }

    /// Archiver.
    pub fn archiver(&self) -> ToolCommand {
        self.archiver.clone().unwrap_or_else(|| ToolCommand::new("tar"))
    }

    /// Icon rasterizer.
    pub fn rasterizer(&self) -> ToolCommand {
        self.rasterizer
            .clone()
            .unwrap_or_else(|| ToolCommand::new("inkscape"))
    }
}
