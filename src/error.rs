//! Application error types using thiserror
//!
//! Error hierarchy:
//! - VersionError: malformed semantic versions or constraints
//! - StartupError: fatal startup check failures
//! - RegistryError: package registry communication (never fatal)
//! - ConfigError: invalid build-time or environment settings

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing versions and version constraints
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Malformed semantic version string
    #[error("invalid version '{input}': {message}")]
    InvalidVersion { input: String, message: String },

    /// Malformed version constraint (e.g. ">=1.0.0")
    #[error("invalid version constraint '{input}': {message}")]
    InvalidConstraint { input: String, message: String },
}

/// Fatal errors that abort the startup sequence
#[derive(Error, Debug)]
pub enum StartupError {
    /// Host runtime is older than the supported minimum
    #[error("wheel requires node v{required} or later, found v{actual}")]
    RuntimeTooOld {
        required: semver::Version,
        actual: semver::Version,
    },

    /// Host runtime could not be found or reported a garbled version
    #[error("could not determine the version of '{program}': {message}")]
    RuntimeUnavailable { program: String, message: String },

    /// User home directory is unset or does not exist
    #[error("{}", home_missing_message(.path))]
    HomeDirectoryMissing { path: Option<PathBuf> },
}

fn home_missing_message(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("home directory does not exist: {}", path.display()),
        None => "could not determine the current user's home directory".to_string(),
    }
}

/// Errors related to package registry communication
///
/// Network failures, timeouts, unexpected statuses and unparseable bodies
/// all surface as `Unavailable`.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Registry could not be reached or returned an unusable response
    #[error("failed to fetch '{package}' from {registry}: {message}")]
    Unavailable {
        package: String,
        registry: String,
        message: String,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A version baked into the build or read from the environment is malformed
    #[error("invalid {setting}: {source}")]
    InvalidVersion {
        setting: &'static str,
        #[source]
        source: VersionError,
    },

    /// Mirror name is neither a known mirror nor an http(s) URL
    #[error("unknown registry mirror '{name}': expected 'npm', 'npmmirror' or an http(s) URL")]
    UnknownMirror { name: String },

    /// HTTP client could not be built
    #[error("failed to create HTTP client: {message}")]
    HttpClient { message: String },
}

impl VersionError {
    /// Creates a new InvalidVersion error
    pub fn invalid_version(input: impl Into<String>, message: impl ToString) -> Self {
        VersionError::InvalidVersion {
            input: input.into(),
            message: message.to_string(),
        }
    }

    /// Creates a new InvalidConstraint error
    pub fn invalid_constraint(input: impl Into<String>, message: impl ToString) -> Self {
        VersionError::InvalidConstraint {
            input: input.into(),
            message: message.to_string(),
        }
    }
}

impl StartupError {
    /// Creates a new RuntimeUnavailable error
    pub fn runtime_unavailable(program: impl Into<String>, message: impl Into<String>) -> Self {
        StartupError::RuntimeUnavailable {
            program: program.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new Unavailable error
    pub fn unavailable(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::Unavailable {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;

    #[test]
    fn test_runtime_too_old_mentions_both_versions() {
        let err = StartupError::RuntimeTooOld {
            required: Version::new(12, 0, 0),
            actual: Version::new(10, 0, 0),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("12.0.0"));
        assert!(msg.contains("10.0.0"));
    }

    #[test]
    fn test_home_missing_without_path() {
        let err = StartupError::HomeDirectoryMissing { path: None };
        let msg = format!("{}", err);
        assert!(msg.contains("home directory"));
    }

    #[test]
    fn test_home_missing_with_path() {
        let err = StartupError::HomeDirectoryMissing {
            path: Some(PathBuf::from("/nowhere/user")),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("does not exist"));
        assert!(msg.contains("/nowhere/user"));
    }

    #[test]
    fn test_registry_unavailable() {
        let err = RegistryError::unavailable("@wheel-cli/core", "npm", "HTTP 503");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch '@wheel-cli/core'"));
        assert!(msg.contains("HTTP 503"));
    }

    #[test]
    fn test_invalid_version() {
        let err = VersionError::invalid_version("bad-version", "unexpected character");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid version 'bad-version'"));
    }

    #[test]
    fn test_config_error_wraps_version_error() {
        let err = ConfigError::InvalidVersion {
            setting: "package version",
            source: VersionError::invalid_version("x.y", "unexpected character"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("invalid package version"));
        assert!(msg.contains("x.y"));
    }

    #[test]
    fn test_unknown_mirror() {
        let err = ConfigError::UnknownMirror {
            name: "yarnpkg".to_string(),
        };
        assert!(format!("{}", err).contains("unknown registry mirror 'yarnpkg'"));
    }
}
