use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::client::GitHubClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}

/// Pull request metadata as returned by the provider's PR listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestSummary {
    pub number: u32,
    pub title: String,
    pub html_url: String,
    pub user: User,
    pub state: String,
    pub created_at: String,
    pub updated_at: String,
    pub body: Option<String>,
}

pub async fn fetch_open_pull_requests(
    client: &GitHubClient,
    repo: &str,
) -> Result<Vec<PullRequestSummary>> {
    client
        .api_get(&format!("repos/{}/pulls?state=open&per_page=100", repo))
        .await
        .context("Failed to fetch the open pull request list")
}
