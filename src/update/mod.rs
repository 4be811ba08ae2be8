//! Self-update checking
//!
//! This module provides:
//! - Resolution of the newest qualifying registry version
//! - The update advisory task that reports (never installs) a newer release

mod advisory;
mod resolver;

pub use advisory::{
    check_for_update, run_update_advisory, spawn_update_advisory, AdvisoryRequest, UpdateNotice,
};
pub use resolver::{newer_versions, resolve_newer_version};
