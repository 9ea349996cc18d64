use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::client::GitHubClient;
use super::pr::User;

/// A pull request comment as returned by the hosting API.
///
/// Both comment endpoints deserialize into this one shape: inline review
/// comments carry `path`/`line`, top-level issue comments do not. `state`
/// is the provider's resolution state and only appears on review comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawComment {
    pub id: u64,
    pub user: User,
    pub body: String,
    pub created_at: String,
    pub html_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl RawComment {
    /// Inline review comments are anchored to a file location.
    pub fn is_inline(&self) -> bool {
        self.path.is_some() || self.line.is_some()
    }
}

/// Top-level comments on the PR's discussion thread.
pub async fn fetch_issue_comments(
    client: &GitHubClient,
    repo: &str,
    pr_number: u32,
) -> Result<Vec<RawComment>> {
    client
        .api_get(&format!(
            "repos/{}/issues/{}/comments?per_page=100",
            repo, pr_number
        ))
        .await
        .context("Failed to fetch issue comments")
}

/// Inline comments anchored to the PR's diff.
pub async fn fetch_review_comments(
    client: &GitHubClient,
    repo: &str,
    pr_number: u32,
) -> Result<Vec<RawComment>> {
    client
        .api_get(&format!(
            "repos/{}/pulls/{}/comments?per_page=100",
            repo, pr_number
        ))
        .await
        .context("Failed to fetch review comments")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_comment_is_inline() {
        let json = r#"{
            "id": 1001,
            "user": { "login": "reviewbot[bot]" },
            "body": "**Severity:** High\nUnchecked index.",
            "created_at": "2024-05-01T12:00:00Z",
            "html_url": "https://github.com/acme/shop/pull/12#discussion_r1001",
            "path": "src/cart.rs",
            "line": 42,
            "commit_id": "abc123",
            "state": "resolved"
        }"#;

        let comment: RawComment = serde_json::from_str(json).unwrap();
        assert!(comment.is_inline());
        assert_eq!(comment.path.as_deref(), Some("src/cart.rs"));
        assert_eq!(comment.state.as_deref(), Some("resolved"));
    }

    #[test]
    fn issue_comment_has_no_anchor() {
        let json = r#"{
            "id": 2002,
            "user": { "login": "octocat" },
            "body": "Looks good overall.",
            "created_at": "2024-05-01T13:00:00Z",
            "html_url": "https://github.com/acme/shop/pull/12#issuecomment-2002"
        }"#;

        let comment: RawComment = serde_json::from_str(json).unwrap();
        assert!(!comment.is_inline());
        assert!(comment.path.is_none());
        assert!(comment.line.is_none());
        assert!(comment.state.is_none());
    }

    #[test]
    fn outdated_review_comment_with_null_line_is_still_inline() {
        let json = r#"{
            "id": 3003,
            "user": { "login": "reviewbot[bot]" },
            "body": "Stale thread.",
            "created_at": "2024-05-01T14:00:00Z",
            "html_url": "https://github.com/acme/shop/pull/12#discussion_r3003",
            "path": "src/pricing.rs",
            "line": null
        }"#;

        let comment: RawComment = serde_json::from_str(json).unwrap();
        assert!(comment.is_inline());
    }

    #[test]
    fn absent_optional_fields_are_skipped_on_serialize() {
        let comment = RawComment {
            id: 1,
            user: User {
                login: "octocat".to_owned(),
            },
            body: "hi".to_owned(),
            created_at: "2024-05-01T13:00:00Z".to_owned(),
            html_url: "https://example.test".to_owned(),
            path: None,
            line: None,
            commit_id: None,
            state: None,
        };

        let value = serde_json::to_value(&comment).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("path"));
        assert!(!object.contains_key("line"));
        assert!(!object.contains_key("state"));
    }
}
