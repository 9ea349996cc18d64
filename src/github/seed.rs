use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use super::client::GitHubClient;

/// Result payload for a freshly created fixture PR.
#[derive(Debug, Clone, Serialize)]
pub struct SeededPullRequest {
    pub number: u32,
    pub title: String,
    pub html_url: String,
    pub branch: String,
}

/// Create a pull request seeded with deliberately flawed sample code so
/// automated review bots produce classifiable comments.
///
/// Uses the git data API: branch ref -> blob -> tree -> commit -> ref
/// update -> PR. The blob is uploaded with utf-8 encoding.
pub async fn create_fixture_pr(client: &GitHubClient, repo: &str) -> Result<SeededPullRequest> {
    let repo_info: Value = client
        .api_get(&format!("repos/{}", repo))
        .await
        .context("Failed to fetch repo info")?;
    let default_branch = repo_info["default_branch"]
        .as_str()
        .context("Repo response missing default_branch")?
        .to_owned();

    let ref_info: Value = client
        .api_get(&format!(
            "repos/{}/git/refs/heads/{}",
            repo, default_branch
        ))
        .await
        .context("Failed to fetch the default branch ref")?;
    let base_sha = ref_info["object"]["sha"]
        .as_str()
        .context("Ref response missing object.sha")?
        .to_owned();

    let stamp = Utc::now().timestamp_millis();
    let branch = format!("test/review-fixture-{}", stamp);

    let _: Value = client
        .api_post(
            &format!("repos/{}/git/refs", repo),
            &json!({
                "ref": format!("refs/heads/{}", branch),
                "sha": base_sha,
            }),
        )
        .await
        .context("Failed to create branch")?;

    let blob: Value = client
        .api_post(
            &format!("repos/{}/git/blobs", repo),
            &json!({
                "content": fixture_source(stamp),
                "encoding": "utf-8",
            }),
        )
        .await
        .context("Failed to create blob")?;

    let base_commit: Value = client
        .api_get(&format!("repos/{}/git/commits/{}", repo, base_sha))
        .await
        .context("Failed to get base commit")?;

    let tree: Value = client
        .api_post(
            &format!("repos/{}/git/trees", repo),
            &json!({
                "base_tree": base_commit["tree"]["sha"],
                "tree": [{
                    "path": format!("lib/review-fixture-{}.ts", stamp),
                    "mode": "100644",
                    "type": "blob",
                    "sha": blob["sha"],
                }],
            }),
        )
        .await
        .context("Failed to create tree")?;

    let commit: Value = client
        .api_post(
            &format!("repos/{}/git/commits", repo),
            &json!({
                "message": format!("Add review fixture ({})", stamp),
                "tree": tree["sha"],
                "parents": [base_sha],
            }),
        )
        .await
        .context("Failed to create commit")?;

    let _: Value = client
        .api_patch(
            &format!("repos/{}/git/refs/heads/{}", repo, branch),
            &json!({ "sha": commit["sha"] }),
        )
        .await
        .context("Failed to update the branch ref")?;

    let pr: Value = client
        .api_post(
            &format!("repos/{}/pulls", repo),
            &json!({
                "title": format!("[TEST] Review fixture - {}", Utc::now().to_rfc3339()),
                "body": FIXTURE_PR_BODY,
                "head": branch,
                "base": default_branch,
            }),
        )
        .await
        .context("Failed to create PR")?;

    Ok(SeededPullRequest {
        number: pr["number"].as_u64().context("PR response missing number")? as u32,
        title: pr["title"].as_str().unwrap_or_default().to_owned(),
        html_url: pr["html_url"].as_str().unwrap_or_default().to_owned(),
        branch,
    })
}

const FIXTURE_PR_BODY: &str = "\
This is a test PR with intentional flaws to trigger automated code review bots.

## Known issues in this PR:
1. ❌ No null/undefined checks
2. ❌ String-concatenated SQL query
3. ❌ Hardcoded credentials
4. ❌ Unhandled promise rejection
5. ❌ Division by zero

This PR should attract multiple automated review comments.";

/// Sample file content with deliberate flaws. Stamped so repeated seeding
/// never collides on the file path or content.
fn fixture_source(stamp: i64) -> String {
    format!(
        r#"// Auto-generated test file with intentional flaws
// Stamp: {stamp}

export function orderSummary(items: any[]): number {{
  let total = 0;

  // Flaw 1: no null/undefined check
  for (let i = 0; i < items.length; i++) {{
    total += items[i].price * items[i].quantity;
  }}

  // Flaw 2: string-concatenated SQL query
  const query = "SELECT * FROM orders WHERE user_id = '" + getUserId() + "'";

  // Flaw 3: hardcoded credentials (fake, still bad practice)
  const API_KEY = "fake_api_key_12345_DO_NOT_COMMIT";

  // Flaw 4: unhandled promise rejection
  fetch('https://api.example.com/data')
    .then(response => response.json());

  // Flaw 5: division by zero
  const average = total / 0;

  return total;
}}

function getUserId(): string {{
  return "user123";
}}
"#
    )
}
