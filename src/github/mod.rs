mod client;
pub mod comment;
mod pr;
mod seed;

// Explicit re-exports - only export what is actually used
pub use client::GitHubClient;
pub use comment::{fetch_issue_comments, fetch_review_comments, RawComment};
pub use pr::{fetch_open_pull_requests, PullRequestSummary, User};
pub use seed::{create_fixture_pr, SeededPullRequest};
