/// GitHub settings kept in chrome.storage.sync
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Storage keys read by the popup and written by the options page
pub const CONFIG_KEYS: [&str; 3] = ["githubToken", "githubOwner", "githubRepo"];

static OWNER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,38})$").expect("valid owner regex"));
static REPO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]{1,100}$").expect("valid repo regex"));

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackerConfig {
    #[serde(rename = "githubToken", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(rename = "githubOwner", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(rename = "githubRepo", default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

/// Everything a save needs, borrowed from a complete config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    pub token: &'a str,
    pub owner: &'a str,
    pub repo: &'a str,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl TrackerConfig {
    pub fn new(token: &str, owner: &str, repo: &str) -> Self {
        TrackerConfig {
            token: Some(token.to_string()),
            owner: Some(owner.to_string()),
            repo: Some(repo.to_string()),
        }
    }

    /// `None` unless token, owner and repo are all non-empty
    pub fn credentials(&self) -> Option<Credentials<'_>> {
        Some(Credentials {
            token: present(&self.token)?,
            owner: present(&self.owner)?,
            repo: present(&self.repo)?,
        })
    }

    /// `(owner, repo)` when both are set; the token is not needed to browse
    pub fn repository(&self) -> Option<(&str, &str)> {
        Some((present(&self.owner)?, present(&self.repo)?))
    }

    /// Trim every field and drop the ones left empty
    pub fn normalized(&self) -> Self {
        let clean = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        TrackerConfig {
            token: clean(&self.token),
            owner: clean(&self.owner),
            repo: clean(&self.repo),
        }
    }

    /// Checks run by the options page before writing; one message per bad field
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let config = self.normalized();
        let mut problems = Vec::new();

        if config.token.is_none() {
            problems.push("GitHub token is required".to_string());
        }
        match config.owner.as_deref() {
            None => problems.push("Owner is required".to_string()),
            Some(owner) if !OWNER_RE.is_match(owner) => {
                problems.push(format!("'{}' is not a valid GitHub user or organization name", owner))
            }
            Some(_) => {}
        }
        match config.repo.as_deref() {
            None => problems.push("Repository is required".to_string()),
            Some(repo) if !REPO_RE.is_match(repo) || repo == "." || repo == ".." => {
                problems.push(format!("'{}' is not a valid repository name", repo))
            }
            Some(_) => {}
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
