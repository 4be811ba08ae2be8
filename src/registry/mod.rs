//! Registry access for the update advisory
//!
//! This module provides:
//! - HTTP client shared foundation with a short timeout
//! - Mirror selection by name or URL
//! - npm registry client returning raw package metadata

mod client;
mod mirror;
mod npm;

pub use client::HttpClient;
pub use mirror::{RegistryMirror, NPMMIRROR_REGISTRY_URL, NPM_REGISTRY_URL};
pub use npm::NpmRegistry;

use crate::error::RegistryError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// Package metadata document as served by the registry
///
/// Only the fields the advisory reads are modelled; per-version metadata
/// is kept opaque.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryPackageInfo {
    /// Package name as reported by the registry
    #[serde(default)]
    pub name: Option<String>,
    /// Published versions keyed by version string
    #[serde(default)]
    pub versions: HashMap<String, serde_json::Value>,
}

impl RegistryPackageInfo {
    /// All published version strings, in no particular order
    pub fn version_strings(&self) -> Vec<&str> {
        self.versions.keys().map(String::as_str).collect()
    }
}

/// Source of package metadata
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// Name of the mirror, for log messages
    fn registry_name(&self) -> &str;

    /// Fetch the metadata document for a package; `Ok(None)` when there is nothing to check
    async fn fetch_package_info(
        &self,
        package: &str,
    ) -> Result<Option<RegistryPackageInfo>, RegistryError>;
}
