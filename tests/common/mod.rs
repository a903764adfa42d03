//! Test support: a throwaway project wired to a fake external toolchain.
//!
//! Every tool is a small shell script that appends its name to `calls.log`
//! and produces the files the real tool would.

#![allow(dead_code)]

use assert_cmd::Command;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const KEY_ENV: &str = "CARGO_PACKAGER_SIGN_PRIVATE_KEY";
pub const PASSWORD_ENV: &str = "CARGO_PACKAGER_SIGN_PRIVATE_KEY_PASSWORD";

const FIXTURE_MANIFEST: &str = include_str!("../fixtures/Cargo.toml");

const FAKE_CARGO: &str = r#"
target=""
bin=""
while [ $# -gt 0 ]; do
  case "$1" in
    --target) target="$2"; shift ;;
    --bin) bin="$2"; shift ;;
  esac
  shift
done
case "$target" in
  *windows*) bin="$bin.exe" ;;
esac
mkdir -p "$CARGO_TARGET_DIR/$target/release"
printf 'binary %s %s' "$target" "$GAME_LAUNCHER_RELEASE_VERSION" > "$CARGO_TARGET_DIR/$target/release/$bin"
"#;

const FAKE_LIPO: &str = r#"
out="$3"
shift 3
cat "$@" > "$out"
"#;

const FAKE_PACKAGER: &str = r#"
config="$2"
version=$(sed -n 's/.*"version": "\([^"]*\)".*/\1/p' "$config")
name=$(sed -n 's/.*"name": "\([^"]*\)".*/\1/p' "$config" | head -n 1)
out=$(sed -n 's/.*"outDir": "\([^"]*\)".*/\1/p' "$config")
printf '%s' "${CARGO_PACKAGER_SIGN_PRIVATE_KEY:-unset}" > "$LOG_DIR/packager-key"
mkdir -p "$out"
case "$PLATFORM" in
  linux)
    printf 'appimage' > "$out/${name}_${version}_amd64.AppImage"
    printf 'deb package' > "$out/${name}_${version}_amd64.deb"
    ;;
  windows)
    printf 'nsis installer' > "$out/${name}_${version}_x64-setup.exe"
    ;;
  macos)
    printf 'disk image' > "$out/GameLauncher_${version}_universal.dmg"
    mkdir -p "$out/GameLauncher.app/Contents/MacOS"
    printf 'bundle' > "$out/GameLauncher.app/Contents/MacOS/launcher"
    ;;
esac
"#;

const FAKE_TAR: &str = r#"
printf 'archive of %s' "$5" > "$2"
"#;

const FAKE_SIGNER: &str = r#"
for last in "$@"; do :; done
printf 'sig:%s' "$(basename "$last")" > "$last.sig"
"#;

/// A project directory with `Cargo.toml`, `Release.toml` and fake tools.
pub struct FakeProject {
    dir: TempDir,
    platform: &'static str,
}

impl FakeProject {
    /// Creates a project for `platform` (`linux`, `macos` or `windows`).
    pub fn new(platform: &'static str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let project = Self { dir, platform };

        std::fs::write(project.path().join("Cargo.toml"), FIXTURE_MANIFEST)
            .expect("failed to write Cargo.toml");
        std::fs::create_dir_all(project.bin_dir()).expect("failed to create bin dir");

        project.script("cargo", FAKE_CARGO);
        project.script("strip", "");
        project.script("lipo", FAKE_LIPO);
        project.script("packager", FAKE_PACKAGER);
        project.script("tar", FAKE_TAR);
        project.script("signer", FAKE_SIGNER);
        project.write_release_toml("");
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn dist(&self) -> PathBuf {
        self.path().join("dist")
    }

    fn bin_dir(&self) -> PathBuf {
        self.path().join("fake-bin")
    }

    /// Writes an executable shell script that logs its invocation.
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.bin_dir().join(name);
        let log = self.path().join("calls.log");
        let contents = format!(
            "#!/bin/sh\nLOG_DIR='{}'\nPLATFORM='{}'\necho {} >> '{}'\n{}\n",
            self.path().display(),
            self.platform,
            name,
            log.display(),
            body
        );
        std::fs::write(&path, contents).expect("failed to write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("failed to chmod script");
        path
    }

    /// Writes `Release.toml` pointing every tool at the fake scripts.
    pub fn write_release_toml(&self, extra: &str) {
        let tool = |name: &str| self.bin_dir().join(name).display().to_string();
        let contents = format!(
            r#"[product]
name = "GameLauncher"
identifier = "com.example.launcher"

[tools.compiler]
program = "{cargo}"

[tools.strip]
program = "{strip}"

[tools.fuse]
program = "{lipo}"

[tools.packager]
program = "{packager}"

[tools.signer]
program = "{signer}"

[tools.archiver]
program = "{tar}"
{extra}
"#,
            cargo = tool("cargo"),
            strip = tool("strip"),
            lipo = tool("lipo"),
            packager = tool("packager"),
            signer = tool("signer"),
            tar = tool("tar"),
        );
        std::fs::write(self.path().join("Release.toml"), contents)
            .expect("failed to write Release.toml");
    }

    /// Names of the tools invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    /// Sorted file names in the output directory.
    pub fn dist_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dist())
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    /// The packager's view of the signing key variable.
    pub fn packager_saw_key(&self) -> String {
        std::fs::read_to_string(self.path().join("packager-key")).unwrap_or_default()
    }

    /// A `release_packager` invocation for this project with signing disabled.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("release_packager").expect("binary should build");
        cmd.arg("-C")
            .arg(self.path())
            .arg("--platform")
            .arg(self.platform)
            .env_remove(KEY_ENV)
            .env_remove(PASSWORD_ENV)
            .env_remove("RUST_LOG");
        cmd
    }

    /// Same as [`FakeProject::command`] with a signing key in the environment.
    pub fn signed_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.env(KEY_ENV, "test-secret-key");
        cmd
    }
}
