use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;
use xdg::BaseDirectories;

use crate::review::PullRequestView;

/// Sanitize repository name to prevent path traversal attacks.
/// Only allows alphanumeric characters, underscores, hyphens, and single dots (not ".." sequences).
/// Returns a sanitized string with '/' replaced by '_'.
pub fn sanitize_repo_name(repo: &str) -> Result<String> {
    // Check for path traversal patterns
    if repo.contains("..") || repo.starts_with('/') || repo.starts_with('\\') {
        return Err(anyhow::anyhow!(
            "Invalid repository name: contains path traversal pattern"
        ));
    }

    // Replace forward slash with underscore (for owner/repo format)
    let sanitized = repo.replace('/', "_");

    // Validate that the result contains only safe characters
    // Allow: alphanumeric, underscore, hyphen, single dot (for names like "foo.js")
    for c in sanitized.chars() {
        if !c.is_alphanumeric() && c != '_' && c != '-' && c != '.' {
            return Err(anyhow::anyhow!(
                "Invalid repository name: contains invalid character '{}'",
                c
            ));
        }
    }

    // Ensure it doesn't start with a dot (hidden file/directory)
    if sanitized.starts_with('.') {
        return Err(anyhow::anyhow!(
            "Invalid repository name: cannot start with a dot"
        ));
    }

    Ok(sanitized)
}

/// A cached dashboard run. The cache is a pure efficiency shortcut: every
/// aggregation re-derives its data, so stale entries are simply refetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardCacheEntry {
    pub views: Vec<PullRequestView>,
    pub created_at: u64,
}

pub enum CacheResult<T> {
    Hit(T),
    Stale(T),
    Miss,
}

/// Cache directory: ~/.cache/vitrine/
pub fn cache_dir() -> PathBuf {
    BaseDirectories::with_prefix("vitrine")
        .map(|dirs| dirs.get_cache_home())
        .unwrap_or_else(|_| PathBuf::from(".cache"))
}

/// Cache file path: ~/.cache/vitrine/{owner}_{repo}_dashboard.json
/// Returns an error if the repository name contains invalid characters or path traversal patterns.
pub fn dashboard_cache_file_path(repo: &str) -> Result<PathBuf> {
    let sanitized = sanitize_repo_name(repo)?;
    Ok(cache_dir().join(format!("{}_dashboard.json", sanitized)))
}

pub fn read_dashboard_cache(repo: &str, ttl_secs: u64) -> Result<CacheResult<DashboardCacheEntry>> {
    let path = dashboard_cache_file_path(repo)?;
    if !path.exists() {
        return Ok(CacheResult::Miss);
    }

    let content = std::fs::read_to_string(&path)?;
    let entry: DashboardCacheEntry = serde_json::from_str(&content)?;

    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)?
        .as_secs();
    let age = now.saturating_sub(entry.created_at);

    if age <= ttl_secs {
        Ok(CacheResult::Hit(entry))
    } else {
        Ok(CacheResult::Stale(entry))
    }
}

pub fn write_dashboard_cache(repo: &str, views: &[PullRequestView]) -> Result<()> {
    std::fs::create_dir_all(cache_dir())?;

    let entry = DashboardCacheEntry {
        views: views.to_vec(),
        created_at: SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)?
            .as_secs(),
    };

    let content = serde_json::to_string_pretty(&entry)?;
    std::fs::write(dashboard_cache_file_path(repo)?, content)?;
    Ok(())
}
