/// GitHub REST calls used to store bookmarks as issues
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;

use crate::error::TrackerError;

const API_BASE: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Deserialize, Clone)]
pub struct ApiRepo {
    pub full_name: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiIssue {
    pub number: u64,
    pub html_url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiComment {
    pub html_url: String,
}

/// Error body GitHub returns alongside non-2xx statuses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The three tracker operations a save goes through
#[async_trait(?Send)]
pub trait IssueTracker {
    async fn get_repo(&self, owner: &str, repo: &str) -> Result<ApiRepo, TrackerError>;
    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
    ) -> Result<ApiIssue, TrackerError>;
    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<ApiComment, TrackerError>;
}

/// Builds an authenticated tracker for the token found in the settings
pub trait TrackerFactory {
    fn connect(&self, token: &str) -> Result<Box<dyn IssueTracker>, TrackerError>;
}

pub struct GitHubClient {
    client: reqwest::Client,
    token: String,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self, TrackerError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(API_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            token: token.to_string(),
        })
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TrackerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let reason = status.canonical_reason().unwrap_or("Request failed");
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => reason.to_string(),
        };
        Err(TrackerError::new(Some(status.as_u16()), message))
    }
}

#[async_trait(?Send)]
impl IssueTracker for GitHubClient {
    async fn get_repo(&self, owner: &str, repo: &str) -> Result<ApiRepo, TrackerError> {
        let url = format!("{}/repos/{}/{}", API_BASE, owner, repo);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
    ) -> Result<ApiIssue, TrackerError> {
        let url = format!("{}/repos/{}/{}/issues", API_BASE, owner, repo);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({"title": title, "body": body}))
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<ApiComment, TrackerError> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            API_BASE, owner, repo, issue_number
        );
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({"body": body}))
            .send()
            .await?;
        Self::parse(response).await
    }
}

/// Production factory: one `GitHubClient` per save
pub struct GitHubConnector;

impl TrackerFactory for GitHubConnector {
    fn connect(&self, token: &str) -> Result<Box<dyn IssueTracker>, TrackerError> {
        Ok(Box::new(GitHubClient::new(token)?))
    }
}
