//! Semantic version parsing helpers
//!
//! Versions are `semver::Version` throughout the crate; this module only
//! normalizes the textual forms we receive (registry keys, `node --version`
//! output) and maps parse failures onto `VersionError`.

use crate::error::VersionError;
use semver::{Version, VersionReq};

/// Default lower bound a registry version must satisfy to be offered as an update
pub const DEFAULT_VERSION_CONSTRAINT: &str = ">=1.0.0";

/// Parse a version string, accepting an optional leading `v`
///
/// Examples:
/// - "1.2.3" -> Version(1, 2, 3)
/// - "v14.17.0" -> Version(14, 17, 0)
/// - "2.0.0-beta.1" -> pre-release version
pub fn parse_version(input: &str) -> Result<Version, VersionError> {
    let trimmed = input.trim();
    let stripped = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(stripped).map_err(|e| VersionError::invalid_version(input, e))
}

/// Parse a version constraint such as ">=1.0.0"
pub fn parse_constraint(input: &str) -> Result<VersionReq, VersionError> {
    VersionReq::parse(input.trim()).map_err(|e| VersionError::invalid_constraint(input, e))
}

/// The constraint used when none is configured
pub fn default_constraint() -> VersionReq {
    VersionReq::parse(DEFAULT_VERSION_CONSTRAINT).unwrap_or(VersionReq::STAR)
}
