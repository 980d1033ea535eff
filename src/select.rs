use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

use crate::github::{GithubClient, PackageVersion};
use crate::versions::VersionEnumerator;

/// Returns the first version whose tag set contains `tag` without
/// consuming the rest of the sequence. Fails after a full scan with a
/// message listing every distinct tag seen.
pub async fn select_by_tag<C: GithubClient>(
    versions: &mut VersionEnumerator<'_, C>,
    tag: &str,
) -> Result<PackageVersion> {
    let mut seen = Vec::new();

    while let Some(version) = versions.try_next().await? {
        let tags = &version.metadata.container.tags;

        if tags.iter().any(|candidate| candidate == tag) {
            return Ok(version);
        }

        for candidate in tags {
            if !seen.contains(candidate) {
                seen.push(candidate.clone());
            }
        }
    }

    Err(anyhow!(
        "Package version with tag '{}' does not exist, available tags: {}",
        tag,
        seen.join(", "),
    ))
}

/// Returns every untagged version except the `keep` most recently updated
/// ones. Consumes the whole sequence since ranking needs a total order.
pub async fn select_untagged_keep_latest<C: GithubClient>(
    versions: &mut VersionEnumerator<'_, C>,
    keep: usize,
) -> Result<Vec<PackageVersion>> {
    let mut untagged = collect_untagged(versions).await?;

    if untagged.len() <= keep {
        return Ok(Vec::new());
    }

    Ok(untagged.split_off(keep))
}

/// Returns every untagged version last updated before `cutoff`, most
/// recent first.
pub async fn select_untagged_older_than<C: GithubClient>(
    versions: &mut VersionEnumerator<'_, C>,
    cutoff: DateTime<Utc>,
) -> Result<Vec<PackageVersion>> {
    let mut untagged = collect_untagged(versions).await?;
    untagged.retain(|version| version.updated_at < cutoff);
    Ok(untagged)
}

async fn collect_untagged<C: GithubClient>(
    versions: &mut VersionEnumerator<'_, C>,
) -> Result<Vec<PackageVersion>> {
    let mut untagged = Vec::new();

    while let Some(version) = versions.try_next().await? {
        if version.is_untagged() {
            untagged.push(version);
        }
    }

    // Most recently updated first; equal timestamps fall back to ascending
    // id so repeated runs over the same listing select the same versions.
    untagged.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    Ok(untagged)
}
