//! Newest-version resolution
//!
//! Picks the greatest published version that satisfies the configured
//! constraint and is strictly newer than the running version.

use crate::domain::parse_version;
use crate::registry::RegistryPackageInfo;
use semver::{Version, VersionReq};
use std::cmp::Ordering;
use tracing::debug;

/// Qualifying versions strictly above `current`, newest first
///
/// Comparison uses semver precedence, so build metadata never makes a
/// release newer.
///
/// Strings that fail to parse are skipped so one bad registry entry cannot
/// hide a valid update.
pub fn newer_versions<'a, I>(current: &Version, versions: I, constraint: &VersionReq) -> Vec<Version>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut candidates: Vec<Version> = versions
        .into_iter()
        .filter_map(|raw| match parse_version(raw) {
            Ok(version) => Some(version),
            Err(e) => {
                debug!("skipping registry entry: {}", e);
                None
            }
        })
        .filter(|version| constraint.matches(version))
        .filter(|version| version.cmp_precedence(current) == Ordering::Greater)
        .collect();

    candidates.sort_by(|a, b| b.cmp_precedence(a).then_with(|| b.cmp(a)));
    candidates
}

/// Greatest qualifying version strictly newer than `current`, if any
pub fn resolve_newer_version(
    current: &Version,
    info: &RegistryPackageInfo,
    constraint: &VersionReq,
) -> Option<Version> {
    newer_versions(current, info.version_strings(), constraint)
        .into_iter()
        .next()
}
