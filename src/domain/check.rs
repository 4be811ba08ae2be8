//! Startup check identifiers and their recorded outcomes

use std::fmt;

/// One step of the startup validation sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// Report the running tool version
    OwnVersion,
    /// Host runtime must meet the minimum version
    RuntimeVersion,
    /// Drop elevated privileges
    Privilege,
    /// A usable home directory must exist
    HomeDirectory,
    /// Parse CLI flags into a log verbosity
    Arguments,
    /// Load `.env` and resolve the config home
    Environment,
}

impl CheckKind {
    /// Execution order of the startup checks
    pub const ORDER: [CheckKind; 6] = [
        CheckKind::OwnVersion,
        CheckKind::RuntimeVersion,
        CheckKind::Privilege,
        CheckKind::HomeDirectory,
        CheckKind::Arguments,
        CheckKind::Environment,
    ];

    /// Returns the display name for this check
    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::OwnVersion => "own version",
            CheckKind::RuntimeVersion => "runtime version",
            CheckKind::Privilege => "privilege",
            CheckKind::HomeDirectory => "home directory",
            CheckKind::Arguments => "arguments",
            CheckKind::Environment => "environment",
        }
    }

    /// Whether a failure of this check aborts startup
    pub fn is_fatal(&self) -> bool {
        matches!(self, CheckKind::RuntimeVersion | CheckKind::HomeDirectory)
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Recorded result of one executed check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub kind: CheckKind,
    pub passed: bool,
    /// Human-readable failure message, `None` when the check passed
    pub message: Option<String>,
}

impl CheckOutcome {
    /// Create a passing outcome
    pub fn passed(kind: CheckKind) -> Self {
        Self {
            kind,
            passed: true,
            message: None,
        }
    }

    /// Create a failing outcome with a message
    pub fn failed(kind: CheckKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            passed: false,
            message: Some(message.into()),
        }
    }
}
