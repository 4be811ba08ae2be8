use crate::domain::{default_constraint, parse_constraint, parse_version};
use crate::error::ConfigError;
use crate::registry::RegistryMirror;
use crate::update::AdvisoryRequest;
use semver::{Version, VersionReq};

// =============================================================================
// Build-time defaults
// =============================================================================

/// Package name the tool is published under
pub const PACKAGE_NAME: &str = "@wheel-cli/core";

/// Oldest supported Node.js release
pub const LOWEST_NODE_VERSION: &str = "12.0.0";

/// Runtime executable probed at startup
pub const RUNTIME_PROGRAM: &str = "node";

/// Config-home directory name used when `CLI_HOME` is unset
pub const DEFAULT_CLI_HOME: &str = ".wheel-cli";

// =============================================================================
// Environment overrides
// =============================================================================

/// Registry mirror name or URL
pub const REGISTRY_VAR: &str = "WHEEL_REGISTRY";

/// Set to `1` to skip the update advisory
pub const NO_UPDATE_CHECK_VAR: &str = "WHEEL_NO_UPDATE_CHECK";

/// Version constraint a release must satisfy to be advertised
pub const UPDATE_CONSTRAINT_VAR: &str = "WHEEL_UPDATE_CONSTRAINT";

/// Inputs of the startup sequence and the update advisory
#[derive(Debug, Clone, PartialEq)]
pub struct StartupSettings {
    pub package_name: String,
    pub current_version: Version,
    pub lowest_runtime_version: Version,
    pub runtime_program: String,
    pub default_cli_home: String,
    pub mirror: RegistryMirror,
    pub update_constraint: VersionReq,
    pub update_check: bool,
}

impl StartupSettings {
    /// Settings from build-time defaults only
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            package_name: PACKAGE_NAME.to_string(),
            current_version: parse_setting("package version", env!("CARGO_PKG_VERSION"))?,
            lowest_runtime_version: parse_setting("minimum node version", LOWEST_NODE_VERSION)?,
            runtime_program: RUNTIME_PROGRAM.to_string(),
            default_cli_home: DEFAULT_CLI_HOME.to_string(),
            mirror: RegistryMirror::default(),
            update_constraint: default_constraint(),
            update_check: true,
        })
    }

    /// Settings with overrides from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = Self::new()?;

        if let Some(mirror) = lookup(REGISTRY_VAR).filter(|v| !v.trim().is_empty()) {
            settings.mirror = mirror.parse()?;
        }

        if let Some(constraint) = lookup(UPDATE_CONSTRAINT_VAR).filter(|v| !v.trim().is_empty()) {
            settings.update_constraint =
                parse_constraint(&constraint).map_err(|source| ConfigError::InvalidVersion {
                    setting: "update constraint",
                    source,
                })?;
        }

        settings.update_check = lookup(NO_UPDATE_CHECK_VAR)
            .map(|v| v != "1")
            .unwrap_or(true);

        Ok(settings)
    }

    /// Request describing this build for the update advisory
    pub fn advisory_request(&self) -> AdvisoryRequest {
        AdvisoryRequest {
            package: self.package_name.clone(),
            current: self.current_version.clone(),
            constraint: self.update_constraint.clone(),
        }
    }
}

fn parse_setting(setting: &'static str, value: &str) -> Result<Version, ConfigError> {
    parse_version(value).map_err(|source| ConfigError::InvalidVersion { setting, source })
}
