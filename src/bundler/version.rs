//! Release version normalization.

/// Strips a single optional leading `v` from a release tag.
///
/// Returns `None` when nothing is left, which callers report as a missing
/// version argument. Input without a leading `v` is returned unchanged apart
/// from surrounding whitespace.
///
/// ```
/// use release_packager::bundler::normalize_version;
///
/// assert_eq!(normalize_version("v2.5.0").as_deref(), Some("2.5.0"));
/// assert_eq!(normalize_version("3.0.0").as_deref(), Some("3.0.0"));
/// assert_eq!(normalize_version(""), None);
/// ```
pub fn normalize_version(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let version = trimmed.strip_prefix('v').unwrap_or(trimmed);

    if version.is_empty() {
        return None;
    }

    if semver::Version::parse(version).is_err() {
        log::warn!("Version '{}' is not valid semver, using it as-is", version);
    }

    Some(version.to_string())
}
