//! Per-invocation runtime configuration derived by the startup checks

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Environment variable carrying the chosen log level
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Environment variable carrying the resolved config home
pub const CLI_HOME_PATH_VAR: &str = "CLI_HOME_PATH";

/// Log verbosity chosen from CLI flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Normal output
    #[default]
    Info,
    /// Debug output enabled with `--debug`
    Verbose,
}

impl LogLevel {
    /// Value exported through `LOG_LEVEL`
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Verbose => "verbose",
        }
    }

    /// Level named by a `LOG_LEVEL` value; anything unrecognized is `Info`
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("verbose") | Some("debug") => LogLevel::Verbose,
            _ => LogLevel::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State derived by a successful startup sequence
///
/// Computed fresh on every run and never written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliRuntimeConfig {
    /// Existing home directory of the current user
    pub home: PathBuf,
    /// Verbosity selected by the argument check
    pub log_level: LogLevel,
    /// `--version` was passed
    pub print_version: bool,
    /// Directory for the tool's own files (`CLI_HOME_PATH`)
    pub config_home: PathBuf,
    /// Pairs read from `<home>/.env` that are not already set in the process
    pub dotenv: BTreeMap<String, String>,
}

impl CliRuntimeConfig {
    /// Variables this run exports to the process environment
    ///
    /// `.env` pairs come first so the produced variables always win.
    pub fn exported_vars(&self) -> Vec<(String, String)> {
        let mut vars: Vec<(String, String)> = self
            .dotenv
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        vars.push((LOG_LEVEL_VAR.to_string(), self.log_level.to_string()));
        vars.push((
            CLI_HOME_PATH_VAR.to_string(),
            self.config_home.display().to_string(),
        ));
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CliRuntimeConfig {
        CliRuntimeConfig {
            home: PathBuf::from("/home/dev"),
            log_level: LogLevel::Verbose,
            print_version: false,
            config_home: PathBuf::from("/home/dev/.wheel-cli"),
            dotenv: BTreeMap::from([("NPM_TOKEN".to_string(), "abc".to_string())]),
        }
    }

    #[test]
    fn test_log_level_strings() {
        assert_eq!(LogLevel::Info.as_str(), "info");
        assert_eq!(LogLevel::Verbose.as_str(), "verbose");
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_log_level_from_env_value() {
        assert_eq!(LogLevel::from_env_value(Some("verbose")), LogLevel::Verbose);
        assert_eq!(LogLevel::from_env_value(Some("info")), LogLevel::Info);
        assert_eq!(LogLevel::from_env_value(Some("silly")), LogLevel::Info);
        assert_eq!(LogLevel::from_env_value(None), LogLevel::Info);
    }

    #[test]
    fn test_exported_vars() {
        let vars = sample().exported_vars();
        assert_eq!(
            vars,
            vec![
                ("NPM_TOKEN".to_string(), "abc".to_string()),
                ("LOG_LEVEL".to_string(), "verbose".to_string()),
                (
                    "CLI_HOME_PATH".to_string(),
                    "/home/dev/.wheel-cli".to_string()
                ),
            ]
        );
    }
}
