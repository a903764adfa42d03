//! Product metadata.

/// Product metadata shared by every platform pipeline.
///
/// Usually loaded from `Release.toml`, falling back to the `Cargo.toml`
/// `[package]` section.
///
/// # Examples
///
/// ```no_run
/// use release_packager::bundler::ProductSettings;
///
/// let product = ProductSettings {
///     name: "Launcher".into(),
///     slug: "launcher".into(),
///     identifier: "com.example.launcher".into(),
///     binary: "launcher".into(),
///     description: "A game launcher".into(),
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSettings {
    /// Product name used in canonical artifact names, e.g. `Launcher` in
    /// `Launcher-Linux-1.0.0-x86_64.AppImage`.
    pub name: String,

    /// Internal slug. The packager embeds it in its output file names and it
    /// names the staged binary.
    pub slug: String,

    /// Reverse-domain identifier handed to the packager.
    ///
    /// Example: "com.example.launcher"
    pub identifier: String,

    /// Cargo binary target to compile.
    pub binary: String,

    /// Brief description of the application.
    pub description: String,
}

impl ProductSettings {
    /// Default name of the version-broadcast variable: `<SLUG>_RELEASE_VERSION`.
    pub fn default_version_env(&self) -> String {
        let slug: String = self
            .slug
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
            .collect();
        format!("{slug}_RELEASE_VERSION")
    }
}
