//! Registry mirror selection
//!
//! Mirrors are picked by name (`npm`, `npmmirror`) or given as a full URL.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Public npm registry
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org/";

/// Regional npm mirror
pub const NPMMIRROR_REGISTRY_URL: &str = "https://registry.npmmirror.com/";

/// An npm-compatible registry endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegistryMirror {
    /// registry.npmjs.org
    Npm,
    /// registry.npmmirror.com
    #[default]
    Npmmirror,
    /// Any other http(s) base URL
    Custom(String),
}

impl RegistryMirror {
    /// Base URL of this mirror
    pub fn base_url(&self) -> &str {
        match self {
            RegistryMirror::Npm => NPM_REGISTRY_URL,
            RegistryMirror::Npmmirror => NPMMIRROR_REGISTRY_URL,
            RegistryMirror::Custom(url) => url,
        }
    }

    /// Short name used in log and error messages
    pub fn name(&self) -> &str {
        match self {
            RegistryMirror::Npm => "npm",
            RegistryMirror::Npmmirror => "npmmirror",
            RegistryMirror::Custom(url) => url,
        }
    }

    /// Request URL for a package on this mirror
    pub fn package_url(&self, package: &str) -> String {
        join_url(self.base_url(), &encode_package_name(package))
    }
}

impl FromStr for RegistryMirror {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name.to_ascii_lowercase().as_str() {
            "npm" | "npmjs" => Ok(RegistryMirror::Npm),
            "npmmirror" | "taobao" => Ok(RegistryMirror::Npmmirror),
            _ if name.starts_with("http://") || name.starts_with("https://") => {
                Ok(RegistryMirror::Custom(name.to_string()))
            }
            _ => Err(ConfigError::UnknownMirror {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for RegistryMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encode package name for URL (handles scoped packages)
fn encode_package_name(package: &str) -> String {
    if package.starts_with('@') {
        // Scoped package: @scope/name -> @scope%2Fname
        package.replace('/', "%2F")
    } else {
        package.to_string()
    }
}

/// Join a base URL and a path segment with exactly one slash
fn join_url(base: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        segment.trim_start_matches('/')
    )
}
