/// Error taxonomy surfaced to the user as alerts

/// Which popup action hit the error; only changes the alert wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Save,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookmarkError {
    #[error("GitHub configuration incomplete")]
    ConfigIncomplete(UserAction),
    #[error("Repository not found: {owner}/{repo}")]
    RepoNotFound { owner: String, repo: String },
    #[error("Failed to access repository: {0}")]
    RepoAccessFailed(String),
    #[error("GitHub API Error: Unauthorized")]
    Unauthorized,
    #[error("GitHub API Error: Forbidden")]
    Forbidden,
    #[error("GitHub API Error: Not Found ({owner}/{repo})")]
    NotFound { owner: String, repo: String },
    #[error("Failed to create GitHub issue: {0}")]
    Unknown(String),
}

/// Failure from the REST client: HTTP status when the server answered, plus a readable message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TrackerError {
    pub status: Option<u16>,
    pub message: String,
}

impl TrackerError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        TrackerError {
            status,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        TrackerError {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl BookmarkError {
    /// Classify a failure while creating the issue or its comment
    pub fn from_create_failure(err: &TrackerError, owner: &str, repo: &str) -> Self {
        match err.status {
            Some(401) => BookmarkError::Unauthorized,
            Some(403) => BookmarkError::Forbidden,
            Some(404) => BookmarkError::NotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
            },
            _ => BookmarkError::Unknown(err.message.clone()),
        }
    }

    /// Classify a failure of the repository access check
    pub fn from_repo_check(err: &TrackerError, owner: &str, repo: &str) -> Self {
        if err.is_not_found() {
            BookmarkError::RepoNotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }
        } else {
            BookmarkError::RepoAccessFailed(err.message.clone())
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            BookmarkError::ConfigIncomplete(_) => "config_incomplete",
            BookmarkError::RepoNotFound { .. } => "repo_not_found",
            BookmarkError::RepoAccessFailed(_) => "repo_access_failed",
            BookmarkError::Unauthorized => "unauthorized",
            BookmarkError::Forbidden => "forbidden",
            BookmarkError::NotFound { .. } => "not_found",
            BookmarkError::Unknown(_) => "unknown",
        }
    }

    /// Text shown in the alert dialog
    pub fn alert_message(&self) -> String {
        match self {
            BookmarkError::ConfigIncomplete(UserAction::Save) => {
                "GitHub configuration incomplete!\n\n\
                 Please configure your GitHub token, owner, and repository in Settings before saving bookmarks."
                    .to_string()
            }
            BookmarkError::ConfigIncomplete(UserAction::Search) => {
                "GitHub configuration incomplete!\n\n\
                 Please configure your GitHub owner and repository in Settings before searching bookmarks."
                    .to_string()
            }
            BookmarkError::RepoNotFound { owner, repo } => format!(
                "Repository not found: {owner}/{repo}\n\n\
                 Possible causes:\n\
                 • Repository doesn't exist\n\
                 • Repository is private and you don't have access\n\
                 • Owner/repo name is incorrect\n\n\
                 Please check your GitHub configuration in Settings."
            ),
            BookmarkError::RepoAccessFailed(message) => {
                format!("Failed to access repository: {message}")
            }
            BookmarkError::Unauthorized => "GitHub API Error: Unauthorized\n\n\
                 Your GitHub token is invalid, expired, or doesn't have the required permissions.\n\n\
                 Please update your token in Settings with proper 'repo' or 'issues:write' scope."
                .to_string(),
            BookmarkError::Forbidden => "GitHub API Error: Forbidden\n\n\
                 Your GitHub token doesn't have permission to create issues in this repository.\n\n\
                 Ensure your token has 'repo' scope for private repos or 'public_repo' scope for public repos."
                .to_string(),
            BookmarkError::NotFound { owner, repo } => format!(
                "GitHub API Error: Not Found\n\n\
                 Possible causes:\n\
                 • Repository {owner}/{repo} doesn't exist\n\
                 • Repository is private and your token doesn't have access\n\
                 • Your GitHub token lacks 'issues:write' permission\n\
                 • Owner or repository name is incorrect\n\n\
                 Please verify your GitHub configuration in Settings."
            ),
            BookmarkError::Unknown(message) => {
                format!("Failed to create GitHub issue: {message}")
            }
        }
    }
}
