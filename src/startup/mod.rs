//! Startup validation sequence
//!
//! This module provides:
//! - Ordered checks: own version → runtime → privilege → home → args → env
//! - Fail-fast on the first fatal check, recording every executed outcome
//! - Collaborator traits for the runtime probe and privilege downgrade
//!
//! The sequence reads its inputs from a captured [`ProcessEnv`] and returns
//! the derived [`CliRuntimeConfig`]; it never mutates process state.

mod env_file;
mod privilege;
mod runtime;

pub use env_file::{
    load_env_file, parse_env_file, resolve_config_home, CLI_HOME_VAR, ENV_FILE_NAME,
};
pub use privilege::{PrivilegeChange, PrivilegeGuard, SudoPrivilegeGuard};
pub use runtime::{check_runtime_version, CommandRuntime, RuntimeProbe};

use crate::cli::CliArgs;
use crate::config::StartupSettings;
use crate::domain::{CheckKind, CheckOutcome, CliRuntimeConfig, LogLevel};
use crate::error::StartupError;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Process inputs the startup checks read
#[derive(Debug, Clone, Default)]
pub struct ProcessEnv {
    /// Command-line arguments without the program name
    pub args: Vec<String>,
    /// Home directory reported by the platform
    pub home: Option<PathBuf>,
    /// Snapshot of the process environment
    pub vars: HashMap<String, String>,
}

impl ProcessEnv {
    /// Capture the current process arguments, home directory and environment
    pub fn capture() -> Self {
        Self {
            args: std::env::args().skip(1).collect(),
            home: dirs::home_dir(),
            vars: std::env::vars().collect(),
        }
    }
}

/// Result of running the startup checks
#[derive(Debug)]
pub struct StartupOutcome {
    /// Outcomes of the executed checks, in execution order
    pub checks: Vec<CheckOutcome>,
    /// Derived configuration, or the fatal error that stopped the sequence
    pub result: Result<CliRuntimeConfig, StartupError>,
}

impl StartupOutcome {
    /// Whether every check passed
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// State accumulated while the checks run
#[derive(Debug, Default)]
struct Draft {
    home: Option<PathBuf>,
    log_level: LogLevel,
    print_version: bool,
    config_home: Option<PathBuf>,
    dotenv: BTreeMap<String, String>,
}

/// Runs the startup checks in order
pub struct StartupValidator {
    settings: StartupSettings,
    runtime: Box<dyn RuntimeProbe>,
    privilege: Box<dyn PrivilegeGuard>,
}

impl StartupValidator {
    /// Create a validator using the real runtime probe and privilege guard
    pub fn new(settings: StartupSettings) -> Self {
        let runtime = Box::new(CommandRuntime::new(settings.runtime_program.clone()));
        Self::with_collaborators(settings, runtime, Box::new(SudoPrivilegeGuard::from_env()))
    }

    /// Create a validator with custom collaborators (for testing)
    pub fn with_collaborators(
        settings: StartupSettings,
        runtime: Box<dyn RuntimeProbe>,
        privilege: Box<dyn PrivilegeGuard>,
    ) -> Self {
        Self {
            settings,
            runtime,
            privilege,
        }
    }

    /// Run every check, stopping at the first fatal failure
    pub fn run(&self, env: &ProcessEnv) -> StartupOutcome {
        let mut draft = Draft::default();
        let mut checks = Vec::with_capacity(CheckKind::ORDER.len());

        for kind in CheckKind::ORDER {
            match self.run_check(kind, env, &mut draft) {
                Ok(()) => checks.push(CheckOutcome::passed(kind)),
                Err(e) => {
                    debug!("startup check '{}' failed: {}", kind, e);
                    checks.push(CheckOutcome::failed(kind, e.to_string()));
                    return StartupOutcome {
                        checks,
                        result: Err(e),
                    };
                }
            }
        }

        StartupOutcome {
            checks,
            result: draft.finish(),
        }
    }

    fn run_check(
        &self,
        kind: CheckKind,
        env: &ProcessEnv,
        draft: &mut Draft,
    ) -> Result<(), StartupError> {
        match kind {
            CheckKind::OwnVersion => {
                info!("current version: {}", self.settings.current_version);
                Ok(())
            }
            CheckKind::RuntimeVersion => {
                let actual = self.runtime.version()?;
                debug!("{} version: {}", self.runtime.program(), actual);
                check_runtime_version(&self.settings.lowest_runtime_version, &actual)
            }
            CheckKind::Privilege => {
                if let PrivilegeChange::Dropped { uid, gid } = self.privilege.downgrade() {
                    debug!("continuing as uid {} gid {}", uid, gid);
                }
                Ok(())
            }
            CheckKind::HomeDirectory => {
                draft.home = Some(check_home_directory(env.home.as_deref())?);
                Ok(())
            }
            CheckKind::Arguments => {
                let args = CliArgs::from_args(&env.args);
                draft.log_level = args.log_level();
                draft.print_version = args.print_version;
                Ok(())
            }
            CheckKind::Environment => {
                let home = draft
                    .home
                    .clone()
                    .ok_or(StartupError::HomeDirectoryMissing { path: None })?;
                self.check_environment(&home, env, draft);
                Ok(())
            }
        }
    }

    fn check_environment(&self, home: &Path, env: &ProcessEnv, draft: &mut Draft) {
        let file_vars = load_env_file(home).unwrap_or_else(|e| {
            warn!("ignoring unreadable {}: {}", home.join(ENV_FILE_NAME).display(), e);
            BTreeMap::new()
        });

        // Variables already in the process environment win over the file
        draft.dotenv = file_vars
            .into_iter()
            .filter(|(key, _)| !env.vars.contains_key(key))
            .collect();

        // An empty process value does not mask the file entry
        let non_empty = |value: &&String| !value.trim().is_empty();
        let cli_home = env
            .vars
            .get(CLI_HOME_VAR)
            .filter(non_empty)
            .or_else(|| draft.dotenv.get(CLI_HOME_VAR).filter(non_empty))
            .map(String::as_str);

        let config_home = resolve_config_home(home, cli_home, &self.settings.default_cli_home);
        debug!("config home: {}", config_home.display());
        draft.config_home = Some(config_home);
    }
}

impl Draft {
    fn finish(self) -> Result<CliRuntimeConfig, StartupError> {
        let home = self
            .home
            .ok_or(StartupError::HomeDirectoryMissing { path: None })?;
        let config_home = self
            .config_home
            .unwrap_or_else(|| home.join(crate::config::DEFAULT_CLI_HOME));

        Ok(CliRuntimeConfig {
            home,
            log_level: self.log_level,
            print_version: self.print_version,
            config_home,
            dotenv: self.dotenv,
        })
    }
}

/// Fail unless `home` is set, non-empty and exists
pub fn check_home_directory(home: Option<&Path>) -> Result<PathBuf, StartupError> {
    let home = home
        .filter(|path| !path.as_os_str().is_empty())
        .ok_or(StartupError::HomeDirectoryMissing { path: None })?;

    if !home.exists() {
        return Err(StartupError::HomeDirectoryMissing {
            path: Some(home.to_path_buf()),
        });
    }

    Ok(home.to_path_buf())
}
