//! Elevated-privilege handling
//!
//! Files created by a scaffolding run must belong to the invoking user, so
//! when started through `sudo` the process drops back to the original
//! user's ids. This step never fails startup.

use std::io;
use tracing::{debug, warn};

/// Effect of a privilege downgrade attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeChange {
    /// Not elevated, or no ids to drop to
    Unchanged,
    /// Switched to the given user and group
    Dropped { uid: u32, gid: u32 },
}

/// Lowers effective privilege when running elevated
pub trait PrivilegeGuard: Send + Sync {
    fn downgrade(&self) -> PrivilegeChange;
}

/// Process credential operations used by the downgrade
#[cfg_attr(not(unix), allow(dead_code))]
trait Credentials {
    fn effective_uid(&self) -> u32;
    fn clear_supplementary_groups(&self) -> io::Result<()>;
    fn set_gid(&self, gid: u32) -> io::Result<()>;
    fn set_uid(&self, uid: u32) -> io::Result<()>;
}

/// Drops root to the ids recorded by sudo in `SUDO_UID` / `SUDO_GID`
///
/// Supplementary groups are cleared as well, so no root group membership
/// survives the switch.
#[derive(Debug, Clone, Default)]
pub struct SudoPrivilegeGuard {
    sudo_uid: Option<u32>,
    sudo_gid: Option<u32>,
}

impl SudoPrivilegeGuard {
    /// Read the sudo ids from the process environment
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("SUDO_UID").ok().as_deref(),
            std::env::var("SUDO_GID").ok().as_deref(),
        )
    }

    /// Build a guard from raw `SUDO_UID` / `SUDO_GID` values
    pub fn new(sudo_uid: Option<&str>, sudo_gid: Option<&str>) -> Self {
        Self {
            sudo_uid: sudo_uid.and_then(|v| v.trim().parse().ok()),
            sudo_gid: sudo_gid.and_then(|v| v.trim().parse().ok()),
        }
    }

    /// Target ids, present only when both were recorded
    fn target_ids(&self) -> Option<(u32, u32)> {
        Some((self.sudo_uid?, self.sudo_gid?))
    }

    #[cfg_attr(not(unix), allow(dead_code))]
    fn downgrade_with(&self, creds: &impl Credentials) -> PrivilegeChange {
        if creds.effective_uid() != 0 {
            return PrivilegeChange::Unchanged;
        }

        let Some((uid, gid)) = self.target_ids() else {
            debug!("running as root without SUDO_UID/SUDO_GID; keeping privileges");
            return PrivilegeChange::Unchanged;
        };

        // Groups go first: after setuid the process may no longer change them.
        if let Err(e) = creds.clear_supplementary_groups() {
            warn!("failed to clear supplementary groups: {}", e);
            return PrivilegeChange::Unchanged;
        }
        if let Err(e) = creds.set_gid(gid) {
            warn!("failed to drop group to {}: {}", gid, e);
            return PrivilegeChange::Unchanged;
        }
        if let Err(e) = creds.set_uid(uid) {
            warn!("failed to drop user to {}: {}", uid, e);
            return PrivilegeChange::Unchanged;
        }

        debug!("dropped root privileges to uid {} gid {}", uid, gid);
        PrivilegeChange::Dropped { uid, gid }
    }
}

#[cfg(unix)]
struct LibcCredentials;

#[cfg(unix)]
fn os_result(ret: libc::c_int) -> io::Result<()> {
    if ret == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(unix)]
impl Credentials for LibcCredentials {
    fn effective_uid(&self) -> u32 {
        // SAFETY: geteuid has no preconditions and cannot fail
        unsafe { libc::geteuid() }
    }

    fn clear_supplementary_groups(&self) -> io::Result<()> {
        // SAFETY: a zero-length list is never dereferenced, so null is valid
        os_result(unsafe { libc::setgroups(0, std::ptr::null()) })
    }

    fn set_gid(&self, gid: u32) -> io::Result<()> {
        // SAFETY: setgid only reads its integer argument
        os_result(unsafe { libc::setgid(gid) })
    }

    fn set_uid(&self, uid: u32) -> io::Result<()> {
        // SAFETY: setuid only reads its integer argument
        os_result(unsafe { libc::setuid(uid) })
    }
}

#[cfg(unix)]
impl PrivilegeGuard for SudoPrivilegeGuard {
    fn downgrade(&self) -> PrivilegeChange {
        self.downgrade_with(&LibcCredentials)
    }
}

#[cfg(not(unix))]
impl PrivilegeGuard for SudoPrivilegeGuard {
    fn downgrade(&self) -> PrivilegeChange {
        PrivilegeChange::Unchanged
    }
}
