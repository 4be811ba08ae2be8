//! Core domain models for wheel
//!
//! This module contains the fundamental types used throughout the application:
//! - Semantic version parsing and the default update constraint
//! - Startup check identifiers and outcomes
//! - The runtime configuration derived by the startup checks

mod check;
mod runtime_config;
mod version;

pub use check::{CheckKind, CheckOutcome};
pub use runtime_config::{CliRuntimeConfig, LogLevel, CLI_HOME_PATH_VAR, LOG_LEVEL_VAR};
pub use version::{default_constraint, parse_constraint, parse_version, DEFAULT_VERSION_CONSTRAINT};
