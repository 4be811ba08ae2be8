//! Update advisory
//!
//! Checks the registry for a newer release of the tool and reports it.
//! The check runs as its own task and never fails the caller: registry
//! errors are logged at debug level and dropped.

use crate::error::RegistryError;
use crate::registry::PackageRegistry;
use crate::update::resolve_newer_version;
use colored::Colorize;
use semver::{Version, VersionReq};
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A newer release is available
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateNotice {
    pub package: String,
    pub current: Version,
    pub latest: Version,
}

impl UpdateNotice {
    /// Command the user should run to upgrade
    pub fn upgrade_command(&self) -> String {
        format!("npm install -g {}", self.package)
    }
}

impl fmt::Display for UpdateNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "please update {} manually, current version: {}, latest version: {}; run `{}`",
            self.package,
            self.current.to_string().yellow(),
            self.latest.to_string().green(),
            self.upgrade_command()
        )
    }
}

/// Inputs of one advisory run
#[derive(Debug, Clone)]
pub struct AdvisoryRequest {
    pub package: String,
    pub current: Version,
    pub constraint: VersionReq,
}

/// Query the registry and resolve a newer version
pub async fn check_for_update(
    registry: &dyn PackageRegistry,
    request: &AdvisoryRequest,
) -> Result<Option<UpdateNotice>, RegistryError> {
    let Some(info) = registry.fetch_package_info(&request.package).await? else {
        return Ok(None);
    };

    Ok(
        resolve_newer_version(&request.current, &info, &request.constraint).map(|latest| {
            UpdateNotice {
                package: request.package.clone(),
                current: request.current.clone(),
                latest,
            }
        }),
    )
}

/// Run the advisory and log its result; registry failures are only logged
pub async fn run_update_advisory(
    registry: &dyn PackageRegistry,
    request: &AdvisoryRequest,
) -> Option<UpdateNotice> {
    match check_for_update(registry, request).await {
        Ok(Some(notice)) => {
            warn!("{}", notice);
            Some(notice)
        }
        Ok(None) => {
            debug!(
                "{} {} is up to date on {}",
                request.package,
                request.current,
                registry.registry_name()
            );
            None
        }
        Err(e) => {
            debug!("update check against {} skipped: {}", registry.registry_name(), e);
            None
        }
    }
}

/// Spawn the advisory on the current runtime
///
/// The returned handle may be awaited or dropped; dropping it leaves the
/// check running detached.
pub fn spawn_update_advisory(
    registry: Arc<dyn PackageRegistry>,
    request: AdvisoryRequest,
) -> JoinHandle<Option<UpdateNotice>> {
    tokio::spawn(async move { run_update_advisory(registry.as_ref(), &request).await })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_constraint;
    use crate::registry::RegistryPackageInfo;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockRegistry {
        versions: Option<Vec<&'static str>>,
        calls: AtomicUsize,
    }

    impl MockRegistry {
        fn with_versions(versions: &[&'static str]) -> Self {
            Self {
                versions: Some(versions.to_vec()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                versions: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PackageRegistry for MockRegistry {
        fn registry_name(&self) -> &str {
            "mock"
        }

        async fn fetch_package_info(
            &self,
            package: &str,
        ) -> Result<Option<RegistryPackageInfo>, RegistryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if package.is_empty() {
                return Ok(None);
            }
            match &self.versions {
                Some(versions) => Ok(Some(RegistryPackageInfo {
                    name: Some(package.to_string()),
                    versions: versions
                        .iter()
                        .map(|v| (v.to_string(), serde_json::Value::Null))
                        .collect(),
                })),
                None => Err(RegistryError::unavailable(package, "mock", "connection reset")),
            }
        }
    }

    fn request(current: &str) -> AdvisoryRequest {
        AdvisoryRequest {
            package: "@wheel-cli/core".to_string(),
            current: Version::parse(current).unwrap(),
            constraint: default_constraint(),
        }
    }

    #[tokio::test]
    async fn test_check_reports_newer_version() {
        let registry = MockRegistry::with_versions(&["1.0.0", "1.2.0", "1.3.0", "2.0.0"]);
        let notice = check_for_update(&registry, &request("1.2.0"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(notice.latest, Version::new(2, 0, 0));
        assert_eq!(notice.current, Version::new(1, 2, 0));
        assert_eq!(notice.upgrade_command(), "npm install -g @wheel-cli/core");
    }

    #[tokio::test]
    async fn test_check_none_when_up_to_date() {
        let registry = MockRegistry::with_versions(&["1.0.0", "2.5.0"]);
        let result = check_for_update(&registry, &request("3.0.0")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_check_propagates_registry_error() {
        let registry = MockRegistry::failing();
        let result = check_for_update(&registry, &request("1.0.0")).await;
        assert!(matches!(result, Err(RegistryError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn test_check_empty_package_is_nothing_to_check() {
        let registry = MockRegistry::with_versions(&["9.0.0"]);
        let mut req = request("1.0.0");
        req.package = String::new();
        assert!(check_for_update(&registry, &req).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_run_swallows_registry_error() {
        let registry = MockRegistry::failing();
        assert!(run_update_advisory(&registry, &request("1.0.0"))
            .await
            .is_none());
        assert_eq!(registry.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_spawned_advisory_returns_notice() {
        let registry: Arc<dyn PackageRegistry> =
            Arc::new(MockRegistry::with_versions(&["1.0.4", "1.1.0"]));
        let handle = spawn_update_advisory(registry, request("1.0.4"));
        let notice = handle.await.unwrap().unwrap();
        assert_eq!(notice.latest, Version::new(1, 1, 0));
    }

    #[tokio::test]
    async fn test_spawned_advisory_failure_stays_in_task() {
        let registry: Arc<dyn PackageRegistry> = Arc::new(MockRegistry::failing());
        let handle = spawn_update_advisory(registry, request("1.0.4"));
        assert_eq!(handle.await.unwrap(), None);
    }

    #[test]
    fn test_notice_display_mentions_versions() {
        colored::control::set_override(false);
        let notice = UpdateNotice {
            package: "@wheel-cli/core".to_string(),
            current: Version::new(1, 0, 0),
            latest: Version::new(1, 1, 0),
        };
        let text = notice.to_string();
        assert!(text.contains("current version: 1.0.0"));
        assert!(text.contains("latest version: 1.1.0"));
        assert!(text.contains("npm install -g @wheel-cli/core"));
    }
}
