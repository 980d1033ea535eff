use anyhow::{anyhow, Result};

use crate::github::PackageOwner;

/// Retention rule for a single run. Exactly one is in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Delete the one version carrying this tag.
    ByTag(String),
    /// Keep the n most recently updated untagged versions, delete the rest.
    KeepLatestUntagged(u32),
    /// Delete untagged versions last updated more than this many days ago.
    OlderThanUntagged(u32),
}

impl SelectionMode {
    pub fn parse(
        tag: Option<String>,
        untagged_keep_latest: Option<u32>,
        untagged_older_than: Option<u32>,
    ) -> Result<Self> {
        match (tag, untagged_keep_latest, untagged_older_than) {
            (Some(tag), None, None) => Ok(Self::ByTag(tag)),
            (None, Some(keep), None) => Ok(Self::KeepLatestUntagged(keep)),
            (None, None, Some(days)) => Ok(Self::OlderThanUntagged(days)),
            (None, None, None) => Err(anyhow!(
                "No selector provided, use --tag, --untagged-keep-latest or --untagged-older-than"
            )),
            _ => Err(anyhow!("Too many selectors defined, use only one")),
        }
    }
}

pub struct Config {
    pub owner: PackageOwner,
    pub package_name: String,
    pub mode: SelectionMode,
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_selector() {
        let mode = SelectionMode::parse(Some("v1".to_string()), None, None).unwrap();
        assert_eq!(mode, SelectionMode::ByTag("v1".to_string()));

        let mode = SelectionMode::parse(None, Some(3), None).unwrap();
        assert_eq!(mode, SelectionMode::KeepLatestUntagged(3));

        let mode = SelectionMode::parse(None, None, Some(14)).unwrap();
        assert_eq!(mode, SelectionMode::OlderThanUntagged(14));
    }

    #[test]
    fn test_parse_no_selector() {
        let error = SelectionMode::parse(None, None, None).unwrap_err();
        assert!(error.to_string().contains("No selector"));
    }

    #[test]
    fn test_parse_too_many_selectors() {
        let error = SelectionMode::parse(Some("v1".to_string()), Some(3), None).unwrap_err();
        assert!(error.to_string().contains("Too many selectors"));

        let error = SelectionMode::parse(Some("v1".to_string()), Some(3), Some(14)).unwrap_err();
        assert!(error.to_string().contains("Too many selectors"));
    }

    #[test]
    fn test_parse_zero_keep_latest_is_valid() {
        let mode = SelectionMode::parse(None, Some(0), None).unwrap();
        assert_eq!(mode, SelectionMode::KeepLatestUntagged(0));
    }
}
