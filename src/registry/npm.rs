//! npm Registry client
//!
//! Fetches package metadata documents from an npm-compatible mirror.
//! API endpoint: {mirror}/{package}

use crate::error::RegistryError;
use crate::registry::{HttpClient, PackageRegistry, RegistryMirror, RegistryPackageInfo};
use async_trait::async_trait;
use tracing::debug;

/// npm Registry client bound to a default mirror
pub struct NpmRegistry {
    client: HttpClient,
    mirror: RegistryMirror,
}

impl NpmRegistry {
    /// Create a new npm client for the given mirror
    pub fn new(client: HttpClient, mirror: RegistryMirror) -> Self {
        Self { client, mirror }
    }

    /// Mirror used when none is passed explicitly
    pub fn mirror(&self) -> &RegistryMirror {
        &self.mirror
    }

    /// Fetch the metadata document for a package
    ///
    /// An empty package name means there is nothing to check and yields
    /// `Ok(None)` without issuing a request. `mirror` overrides the client's
    /// default mirror for this call.
    pub async fn fetch_from(
        &self,
        package: &str,
        mirror: Option<&RegistryMirror>,
    ) -> Result<Option<RegistryPackageInfo>, RegistryError> {
        if package.is_empty() {
            return Ok(None);
        }

        let mirror = mirror.unwrap_or(&self.mirror);
        let url = mirror.package_url(package);
        debug!("fetching package info from {}", url);

        let info: RegistryPackageInfo = self.client.get_json(&url, package, mirror.name()).await?;
        debug!(
            "{} lists {} versions on {}",
            info.name.as_deref().unwrap_or(package),
            info.versions.len(),
            mirror
        );
        Ok(Some(info))
    }
}

#[async_trait]
impl PackageRegistry for NpmRegistry {
    fn registry_name(&self) -> &str {
        self.mirror.name()
    }

    async fn fetch_package_info(
        &self,
        package: &str,
    ) -> Result<Option<RegistryPackageInfo>, RegistryError> {
        self.fetch_from(package, None).await
    }
}
