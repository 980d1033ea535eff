use std::collections::VecDeque;

use anyhow::{Context, Result};

use crate::github::{GithubClient, PackageOwner, PackageVersion};

/// Flattens the paginated version listing into a single pull-based
/// sequence. A page is only requested once the previous one has been
/// drained and the consumer asks for more, so selectors that stop early
/// never touch later pages. The sequence cannot be rewound; create a new
/// enumerator to start over from the first page.
pub struct VersionEnumerator<'a, C: GithubClient> {
    client: &'a C,
    owner: &'a PackageOwner,
    package_name: &'a str,
    page: u32,
    buffer: VecDeque<PackageVersion>,
    exhausted: bool,
}

impl<'a, C: GithubClient> VersionEnumerator<'a, C> {
    pub fn new(client: &'a C, owner: &'a PackageOwner, package_name: &'a str) -> Self {
        Self {
            client,
            owner,
            package_name,
            page: 1,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Next version, or None once the registry returns an empty page.
    pub async fn try_next(&mut self) -> Result<Option<PackageVersion>> {
        if self.buffer.is_empty() && !self.exhausted {
            log::debug!(
                "Fetching page {} of {}/{}",
                self.page,
                self.owner,
                self.package_name,
            );

            let versions = self
                .client
                .list_package_versions(self.owner, self.package_name, self.page)
                .await
                .context("Failed to get package versions from github")?;

            if versions.is_empty() {
                self.exhausted = true;
            } else {
                self.page += 1;
                self.buffer.extend(versions);
            }
        }

        Ok(self.buffer.pop_front())
    }
}
