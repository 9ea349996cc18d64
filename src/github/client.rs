use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::comment::{fetch_issue_comments, fetch_review_comments, RawComment};
use super::pr::{fetch_open_pull_requests, PullRequestSummary};
use crate::config::CredentialError;
use crate::review::ReviewHost;

const API_ROOT: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("vitrine/", env!("CARGO_PKG_VERSION"));

/// Authenticated client for the hosting provider's REST API.
///
/// Construction fails when no token is configured; no request is ever
/// attempted without a credential.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    token: String,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Err(CredentialError::MissingGitHubToken.into());
        };
        Ok(Self {
            http: Client::new(),
            token,
        })
    }

    /// Execute a GET request against an API endpoint and parse the JSON response.
    pub async fn api_get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let request = self.http.get(format!("{}/{}", API_ROOT, endpoint));
        self.send(request, endpoint).await
    }

    /// POST a JSON body to an API endpoint.
    pub async fn api_post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let request = self
            .http
            .post(format!("{}/{}", API_ROOT, endpoint))
            .json(body);
        self.send(request, endpoint).await
    }

    /// PATCH a JSON body to an API endpoint.
    pub async fn api_patch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let request = self
            .http
            .patch(format!("{}/{}", API_ROOT, endpoint))
            .json(body);
        self.send(request, endpoint).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<T> {
        debug!(endpoint, "GitHub API request");

        let response = request
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await
            .context("Failed to reach the GitHub API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("GitHub API {}: {}", status.as_u16(), body);
        }

        response
            .json()
            .await
            .context("Failed to parse GitHub API response")
    }
}

#[async_trait]
impl ReviewHost for GitHubClient {
    async fn list_open_pull_requests(&self, repo: &str) -> Result<Vec<PullRequestSummary>> {
        fetch_open_pull_requests(self, repo).await
    }

    async fn list_issue_comments(&self, repo: &str, pr_number: u32) -> Result<Vec<RawComment>> {
        fetch_issue_comments(self, repo, pr_number).await
    }

    async fn list_review_comments(&self, repo: &str, pr_number: u32) -> Result<Vec<RawComment>> {
        fetch_review_comments(self, repo, pr_number).await
    }
}
