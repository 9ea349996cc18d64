//! Dashboard aggregation: fetch -> classify -> sort -> group, per PR.

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::github::{PullRequestSummary, RawComment, User};
use crate::review::classify::{classify_comment, ClassifiedComment};
use crate::review::group::{group_by_provider, ProviderGroups};

/// The hosting-provider operations the dashboard consumes.
///
/// Production uses the GitHub REST client; tests use a stub.
#[async_trait]
pub trait ReviewHost {
    async fn list_open_pull_requests(&self, repo: &str) -> Result<Vec<PullRequestSummary>>;
    async fn list_issue_comments(&self, repo: &str, pr_number: u32) -> Result<Vec<RawComment>>;
    async fn list_review_comments(&self, repo: &str, pr_number: u32) -> Result<Vec<RawComment>>;
}

/// One pull request with its classified, chronologically sorted and
/// provider-grouped review feedback. Rebuilt fresh on every aggregation
/// run; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestView {
    pub number: u32,
    pub title: String,
    pub html_url: String,
    pub user: User,
    pub state: String,
    pub created_at: String,
    pub updated_at: String,
    pub body: Option<String>,
    #[serde(rename = "commentsList")]
    pub comments_list: Vec<ClassifiedComment>,
    #[serde(rename = "groupedComments")]
    pub grouped_comments: ProviderGroups,
    /// True when a comment fetch for this PR failed and its data degraded
    /// to empty. Distinguishes "no comments yet" from "could not load".
    #[serde(rename = "commentsDegraded")]
    pub comments_degraded: bool,
}

/// Build the dashboard: every open PR of the repo with classified comments.
///
/// Views come back in provider listing order. A failed comment fetch
/// degrades that PR to empty comment data; only a failed PR listing is
/// fatal to the whole run. Repeated calls are idempotent and side-effect
/// free on the data.
pub async fn build_dashboard<H: ReviewHost + Sync>(
    host: &H,
    repo: &str,
) -> Result<Vec<PullRequestView>> {
    let prs = host
        .list_open_pull_requests(repo)
        .await
        .context("Failed to list open pull requests")?;

    // Per-PR work is independent; run it concurrently. join_all preserves
    // input order, so the listing order survives.
    Ok(join_all(prs.into_iter().map(|pr| assemble_view(host, repo, pr))).await)
}

async fn assemble_view<H: ReviewHost + Sync>(
    host: &H,
    repo: &str,
    pr: PullRequestSummary,
) -> PullRequestView {
    let (comments, degraded) = fetch_all_comments(host, repo, pr.number).await;

    let mut classified: Vec<ClassifiedComment> =
        comments.into_iter().map(classify_comment).collect();
    classified.sort_by(|a, b| a.raw.created_at.cmp(&b.raw.created_at));

    let grouped = group_by_provider(&classified);

    PullRequestView {
        number: pr.number,
        title: pr.title,
        html_url: pr.html_url,
        user: pr.user,
        state: pr.state,
        created_at: pr.created_at,
        updated_at: pr.updated_at,
        body: pr.body,
        comments_list: classified,
        grouped_comments: grouped,
        comments_degraded: degraded,
    }
}

/// Fetch both comment collections for a PR and concatenate them.
///
/// The two fetches run concurrently. Either one failing degrades that
/// collection to empty instead of failing the PR: a single provider hiccup
/// must not hide all other feedback.
async fn fetch_all_comments<H: ReviewHost + Sync>(
    host: &H,
    repo: &str,
    pr_number: u32,
) -> (Vec<RawComment>, bool) {
    let (issue, review) = tokio::join!(
        host.list_issue_comments(repo, pr_number),
        host.list_review_comments(repo, pr_number),
    );

    let mut comments = Vec::new();
    let mut degraded = false;

    match issue {
        Ok(batch) => comments.extend(batch),
        Err(e) => {
            warn!(pr_number, error = %e, "issue comment fetch failed, continuing without");
            degraded = true;
        }
    }
    match review {
        Ok(batch) => comments.extend(batch),
        Err(e) => {
            warn!(pr_number, error = %e, "review comment fetch failed, continuing without");
            degraded = true;
        }
    }

    (comments, degraded)
}
