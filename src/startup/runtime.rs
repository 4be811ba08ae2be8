//! Host runtime version probing
//!
//! Generated projects run on Node.js, so the CLI refuses to start when the
//! installed `node` is older than the supported minimum.

use crate::domain::parse_version;
use crate::error::StartupError;
use semver::Version;
use std::process::Command;

/// Reports the version of the host runtime
pub trait RuntimeProbe: Send + Sync {
    /// Program name used in messages
    fn program(&self) -> &str;

    /// Detect the installed runtime version
    fn version(&self) -> Result<Version, StartupError>;
}

/// Runtime probe that runs `<program> --version`
#[derive(Debug, Clone)]
pub struct CommandRuntime {
    program: String,
}

impl CommandRuntime {
    /// Create a probe for the given executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl RuntimeProbe for CommandRuntime {
    fn program(&self) -> &str {
        &self.program
    }

    fn version(&self) -> Result<Version, StartupError> {
        let output = Command::new(&self.program)
            .arg("--version")
            .output()
            .map_err(|e| StartupError::runtime_unavailable(&self.program, e.to_string()))?;

        if !output.status.success() {
            return Err(StartupError::runtime_unavailable(
                &self.program,
                format!("`{} --version` exited with {}", self.program, output.status),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_runtime_version(&stdout)
            .map_err(|message| StartupError::runtime_unavailable(&self.program, message))
    }
}

/// Extract the version from `--version` output such as "v18.19.0\n"
fn parse_runtime_version(output: &str) -> Result<Version, String> {
    let first_line = output.lines().next().unwrap_or_default();
    parse_version(first_line).map_err(|e| e.to_string())
}

/// Fail when `actual` is below `required`
pub fn check_runtime_version(required: &Version, actual: &Version) -> Result<(), StartupError> {
    if actual < required {
        return Err(StartupError::RuntimeTooOld {
            required: required.clone(),
            actual: actual.clone(),
        });
    }
    Ok(())
}
