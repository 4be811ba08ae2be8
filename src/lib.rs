//! wheel - scaffolding CLI startup library
//!
//! This library provides the startup pipeline of the wheel CLI:
//! - Ordered environment checks (version, runtime, privilege, home, args, env)
//! - npm registry access through a configurable mirror
//! - Newest-version resolution and the non-blocking update advisory

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod registry;
pub mod startup;
pub mod update;
