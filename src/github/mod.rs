use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

mod api;
mod client;

pub use api::{ContainerVersionMetadata, PackageVersion, PackageVersionMetadata};
pub use client::{GithubClientImpl, PackageOwner};

/// Versions per page requested from the listing endpoint.
pub const PER_PAGE: u32 = 100;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait GithubClient {
    async fn list_package_versions(
        &self,
        owner: &PackageOwner,
        package_name: &str,
        page: u32,
    ) -> Result<Vec<PackageVersion>>;

    async fn delete_package_version(
        &self,
        owner: &PackageOwner,
        package_name: &str,
        version_id: u64,
    ) -> Result<()>;
}
