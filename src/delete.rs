use std::time::Duration;

use anyhow::{Context, Result};

use crate::github::{GithubClient, PackageOwner, PackageVersion};

/// Wait between consecutive deletions to stay under the API rate limit.
/// Throttling only, never a retry.
const PACING_DELAY: Duration = Duration::from_millis(500);

/// Deletes the given versions one at a time, in order, pacing the calls.
/// The first failure aborts the loop; versions deleted up to that point
/// stay deleted.
pub async fn delete_all<C: GithubClient>(
    client: &C,
    owner: &PackageOwner,
    package_name: &str,
    versions: &[PackageVersion],
    dry_run: bool,
) -> Result<()> {
    for (index, version) in versions.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(PACING_DELAY).await;
        }

        let dry_run_suffix = match dry_run {
            true => " (DRY RUN)",
            false => "",
        };
        log::info!(
            "Deleting {}/{}:{}{}",
            owner,
            package_name,
            version.name,
            dry_run_suffix,
        );

        if dry_run {
            continue;
        }

        client
            .delete_package_version(owner, package_name, version.id)
            .await
            .context(format!(
                "Failed to delete version {} of {}/{}",
                version.id, owner, package_name,
            ))?;
    }

    Ok(())
}
