//! CLI argument parsing module for wheel
//!
//! The startup core only understands a handful of global flags. Everything
//! else on the command line belongs to the commands that run after startup
//! and is ignored here.

use crate::domain::LogLevel;
use clap::Parser;

/// Flags recognized during startup
const KNOWN_FLAGS: [&str; 3] = ["--debug", "--version", "-V"];

/// Scaffolding CLI
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(
    name = "wheel",
    about = "Project scaffolding CLI",
    disable_version_flag = true,
    args_override_self = true
)]
pub struct CliArgs {
    /// Enable verbose (debug) logging
    #[arg(long)]
    pub debug: bool,

    /// Print version and exit
    #[arg(short = 'V', long = "version")]
    pub print_version: bool,
}

impl CliArgs {
    /// Parse startup flags from arguments (without the program name)
    ///
    /// Unrecognized arguments are dropped before parsing, so this never fails.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let known = args
            .into_iter()
            .map(|arg| arg.as_ref().to_string())
            .filter(|arg| KNOWN_FLAGS.contains(&arg.as_str()));

        Self::try_parse_from(std::iter::once("wheel".to_string()).chain(known))
            .unwrap_or_default()
    }

    /// Verbosity selected by the flags
    pub fn log_level(&self) -> LogLevel {
        if self.debug {
            LogLevel::Verbose
        } else {
            LogLevel::Info
        }
    }
}
