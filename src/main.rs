use std::env;

use anyhow::{anyhow, Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;

use crate::config::{Config, SelectionMode};
use crate::github::{GithubClient, GithubClientImpl, PackageOwner};
use crate::versions::VersionEnumerator;

mod config;
mod delete;
mod github;
mod select;
#[cfg(test)]
mod test_util;
mod versions;

/// Prune old versions of a GitHub container package.
#[derive(Parser)]
#[clap(version)]
struct Args {
    /// User owning the package (conflicts with --org)
    #[clap(long, conflicts_with = "org")]
    user: Option<String>,

    /// Organization owning the package (conflicts with --user)
    #[clap(long, conflicts_with = "user")]
    org: Option<String>,

    /// Path to a file containing a GitHub token.
    /// You can also pass a token verbatim via the GITHUB_TOKEN env variable.
    #[clap(long)]
    token: Option<String>,

    /// Delete the version carrying this tag
    #[clap(long, conflicts_with_all = &["untagged-keep-latest", "untagged-older-than"])]
    tag: Option<String>,

    /// Keep the N most recently updated untagged versions and delete the rest
    #[clap(long, conflicts_with_all = &["tag", "untagged-older-than"])]
    untagged_keep_latest: Option<u32>,

    /// Delete untagged versions last updated more than N days ago
    #[clap(long, conflicts_with_all = &["tag", "untagged-keep-latest"])]
    untagged_older_than: Option<u32>,

    /// Don't persist but only print changes
    #[clap(long, short = 'n')]
    dry_run: bool,

    /// Make logging more verbose.
    /// You can also specify the log level via the RUST_LOG env variable.
    #[clap(long, short)]
    verbose: bool,

    /// Package to prune
    package_name: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if env::var("RUST_LOG").is_err() {
        let level = match args.verbose {
            true => "debug",
            false => "info",
        };
        env::set_var("RUST_LOG", format!("{}={}", env!("CARGO_PKG_NAME"), level));
    }
    env_logger::init();

    log::info!(
        "Starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    );
    log::debug!("With arguments {:?}", env::args().collect::<Vec<_>>());

    if let Err(error) = run(args).await {
        log::error!("{:?}", error);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    if args.user.is_none() && args.org.is_none() {
        return Err(anyhow!("Neither --user nor --org was provided"));
    }

    let token = match args.token {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .context(format!("Failed to read the github token from {}", path))?
            .trim()
            .to_string(),
        None => env::var("GITHUB_TOKEN")
            .context("No github token provided via --token or GITHUB_TOKEN")?,
    };
    let client = GithubClientImpl::new(token).context("Failed to create github client")?;

    let config = Config {
        owner: PackageOwner::parse(args.user, args.org),
        package_name: args.package_name,
        mode: SelectionMode::parse(
            args.tag,
            args.untagged_keep_latest,
            args.untagged_older_than,
        )?,
        dry_run: args.dry_run,
    };

    prune_package(&client, &config).await.context(format!(
        "Failed to prune package {}/{}",
        config.owner, config.package_name,
    ))
}

async fn prune_package(client: &impl GithubClient, config: &Config) -> Result<()> {
    log::info!("Pruning package {}/{}", config.owner, config.package_name);

    let mut versions = VersionEnumerator::new(client, &config.owner, &config.package_name);

    let targets = match &config.mode {
        SelectionMode::ByTag(tag) => {
            vec![select::select_by_tag(&mut versions, tag).await?]
        }
        SelectionMode::KeepLatestUntagged(keep) => {
            select::select_untagged_keep_latest(&mut versions, *keep as usize).await?
        }
        SelectionMode::OlderThanUntagged(days) => {
            let cutoff = Utc::now() - Duration::days(i64::from(*days));
            select::select_untagged_older_than(&mut versions, cutoff).await?
        }
    };

    if targets.is_empty() {
        log::info!(
            "No versions of {}/{} to delete",
            config.owner,
            config.package_name,
        );
        return Ok(());
    }

    log::info!(
        "Selected {} version(s) of {}/{} for deletion",
        targets.len(),
        config.owner,
        config.package_name,
    );

    delete::delete_all(
        client,
        &config.owner,
        &config.package_name,
        &targets,
        config.dry_run,
    )
    .await
}

#[cfg(test)]
mod tests {
    use mockall::predicate::*;

    use super::*;
    use crate::github::MockGithubClient;
    use crate::test_util::version;

    #[tokio::test]
    async fn test_prune_by_tag_deletes_exactly_the_tagged_version() {
        let mut client = MockGithubClient::new();
        let owner = PackageOwner::User("jane".to_string());

        client
            .expect_list_package_versions()
            .with(eq(owner.clone()), eq("web"), eq(1))
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![
                    version(1, &["v1.0.0"], "2022-01-03T00:00:00Z"),
                    version(2, &[], "2022-01-02T00:00:00Z"),
                    version(3, &["v1.2.0"], "2022-01-01T00:00:00Z"),
                ])
            });
        client
            .expect_delete_package_version()
            .with(eq(owner.clone()), eq("web"), eq(3))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let config = Config {
            owner,
            package_name: "web".to_string(),
            mode: SelectionMode::ByTag("v1.2.0".to_string()),
            dry_run: false,
        };
        prune_package(&client, &config).await.unwrap();
    }

    #[tokio::test]
    async fn test_prune_keep_latest_deletes_the_remainder() {
        let mut client = MockGithubClient::new();
        let owner = PackageOwner::Organization("acme".to_string());

        client
            .expect_list_package_versions()
            .with(eq(owner.clone()), eq("web"), eq(1))
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![
                    version(1, &["latest"], "2022-01-04T00:00:00Z"),
                    version(2, &[], "2022-01-03T00:00:00Z"),
                    version(3, &[], "2022-01-02T00:00:00Z"),
                    version(4, &[], "2022-01-01T00:00:00Z"),
                ])
            });
        client
            .expect_list_package_versions()
            .with(eq(owner.clone()), eq("web"), eq(2))
            .times(1)
            .returning(|_, _, _| Ok(vec![]));
        client
            .expect_delete_package_version()
            .with(eq(owner.clone()), eq("web"), eq(4))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let config = Config {
            owner,
            package_name: "web".to_string(),
            mode: SelectionMode::KeepLatestUntagged(2),
            dry_run: false,
        };
        prune_package(&client, &config).await.unwrap();
    }

    #[tokio::test]
    async fn test_prune_with_nothing_to_delete_makes_no_calls() {
        let mut client = MockGithubClient::new();
        let owner = PackageOwner::User("jane".to_string());

        client
            .expect_list_package_versions()
            .with(eq(owner.clone()), eq("web"), eq(1))
            .times(1)
            .returning(|_, _, _| Ok(vec![version(1, &[], "2022-01-01T00:00:00Z")]));
        client
            .expect_list_package_versions()
            .with(eq(owner.clone()), eq("web"), eq(2))
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let config = Config {
            owner,
            package_name: "web".to_string(),
            mode: SelectionMode::KeepLatestUntagged(2),
            dry_run: false,
        };
        prune_package(&client, &config).await.unwrap();
    }
}
