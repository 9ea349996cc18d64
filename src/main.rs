use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use vitrine::cache::{read_dashboard_cache, write_dashboard_cache, CacheResult};
use vitrine::catalog::{demo_catalog, merge_and_filter, Category};
use vitrine::checkout::{build_order, CheckoutRequest, PROCESSING_DELAY_MS};
use vitrine::config::{Config, CredentialError};
use vitrine::github::{create_fixture_pr, GitHubClient};
use vitrine::identity::verification_hash;
use vitrine::review::build_dashboard;
use vitrine::search::{chunks_to_products, SearchClient};

#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(about = "Demo storefront backend with a PR review dashboard")]
#[command(version)]
struct Args {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate review comments for every open pull request
    Prs {
        /// Repository name (e.g., "owner/repo"); defaults to the configured repo
        #[arg(short, long)]
        repo: Option<String>,

        /// Force refresh, ignore cache
        #[arg(long, default_value = "false")]
        refresh: bool,

        /// Cache TTL in seconds (default: 300 = 5 minutes)
        #[arg(long)]
        cache_ttl: Option<u64>,
    },
    /// Create a fixture pull request that attracts review-bot comments
    SeedPr {
        /// Repository name (e.g., "owner/repo"); defaults to the configured repo
        #[arg(short, long)]
        repo: Option<String>,
    },
    /// List catalog products, merged with the vector-search source when configured
    Products {
        /// Only keep products in this category
        #[arg(long)]
        category: Option<Category>,

        /// Free-text filter over name and description
        #[arg(long)]
        search: Option<String>,

        /// Skip the vector-search source
        #[arg(long, default_value = "false")]
        local_only: bool,
    },
    /// Query the vector-search product source directly
    Search {
        /// Search query; blank falls back to a broad default
        query: Option<String>,
    },
    /// Validate and price a checkout request, emit the confirmed order
    Checkout {
        /// Read the checkout request JSON from a file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Keyed identity hash for the chat widget
    Identify {
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load()?;

    match args.command {
        Command::Prs {
            repo,
            refresh,
            cache_ttl,
        } => run_prs(&config, repo, refresh, cache_ttl, args.pretty).await,
        Command::SeedPr { repo } => run_seed_pr(&config, repo, args.pretty).await,
        Command::Products {
            category,
            search,
            local_only,
        } => run_products(&config, category, search, local_only, args.pretty).await,
        Command::Search { query } => run_search(&config, query, args.pretty).await,
        Command::Checkout { input } => run_checkout(input, args.pretty).await,
        Command::Identify { user_id } => run_identify(&config, &user_id, args.pretty),
    }
}

async fn run_prs(
    config: &Config,
    repo: Option<String>,
    refresh: bool,
    cache_ttl: Option<u64>,
    pretty: bool,
) -> Result<()> {
    let repo = repo.unwrap_or_else(|| config.github.repo.clone());
    let ttl = cache_ttl.unwrap_or(config.github.cache_ttl_secs);

    if !refresh {
        if let Ok(CacheResult::Hit(entry)) = read_dashboard_cache(&repo, ttl) {
            debug!(%repo, "serving dashboard from cache");
            write_json(&entry.views, pretty);
            return Ok(());
        }
    }

    let client = GitHubClient::new(config.github.token.clone())?;
    let views = build_dashboard(&client, &repo).await?;

    if let Err(e) = write_dashboard_cache(&repo, &views) {
        warn!(error = %e, "failed to write the dashboard cache");
    }

    write_json(&views, pretty);
    Ok(())
}

async fn run_seed_pr(config: &Config, repo: Option<String>, pretty: bool) -> Result<()> {
    let repo = repo.unwrap_or_else(|| config.github.repo.clone());
    let client = GitHubClient::new(config.github.token.clone())?;
    let seeded = create_fixture_pr(&client, &repo).await?;

    write_json(&json!({ "success": true, "pr": seeded }), pretty);
    Ok(())
}

async fn run_products(
    config: &Config,
    category: Option<Category>,
    search: Option<String>,
    local_only: bool,
    pretty: bool,
) -> Result<()> {
    let local = demo_catalog();
    let local_count = local.len();

    // The search source is optional for the listing: missing configuration
    // or a failed query degrades to the hardcoded catalog.
    let remote = if local_only {
        Vec::new()
    } else {
        match SearchClient::new(
            config.search.api_key.clone(),
            config.search.store_id.clone(),
        ) {
            Ok(client) => match client.search(search.as_deref().unwrap_or("")).await {
                Ok(chunks) => chunks_to_products(&chunks),
                Err(e) => {
                    warn!(error = %e, "vector search failed, listing local catalog only");
                    Vec::new()
                }
            },
            Err(e) => {
                debug!(error = %e, "vector search not configured, listing local catalog only");
                Vec::new()
            }
        }
    };
    let remote_count = remote.len();

    let products = merge_and_filter(local, remote, category, search.as_deref());
    let total_count = products.len();

    write_json(
        &json!({
            "products": products,
            "hardcodedCount": local_count,
            "mixedbreadCount": remote_count,
            "totalCount": total_count,
        }),
        pretty,
    );
    Ok(())
}

async fn run_search(config: &Config, query: Option<String>, pretty: bool) -> Result<()> {
    let client = SearchClient::new(
        config.search.api_key.clone(),
        config.search.store_id.clone(),
    )?;
    let results = client.search(query.as_deref().unwrap_or("")).await?;

    write_json(&json!({ "results": results }), pretty);
    Ok(())
}

async fn run_checkout(input: Option<PathBuf>, pretty: bool) -> Result<()> {
    let content = match input {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin())
            .context("Failed to read the checkout request from stdin")?,
    };
    let request: CheckoutRequest =
        serde_json::from_str(&content).context("Failed to parse the checkout request JSON")?;

    match build_order(request) {
        Ok(order) => {
            // Simulated processing delay; there is no real payment step.
            tokio::time::sleep(std::time::Duration::from_millis(PROCESSING_DELAY_MS)).await;
            write_json(&order, pretty);
            Ok(())
        }
        Err(errors) => {
            write_json(&json!({ "errors": errors }), pretty);
            bail!("Checkout validation failed");
        }
    }
}

fn run_identify(config: &Config, user_id: &str, pretty: bool) -> Result<()> {
    let Some(secret) = config.chat.secret.as_deref().filter(|s| !s.is_empty()) else {
        return Err(CredentialError::MissingChatSecret.into());
    };
    if user_id.trim().is_empty() {
        bail!("userId is required");
    }

    write_json(&json!({ "hash": verification_hash(secret, user_id) }), pretty);
    Ok(())
}

/// Write JSON output to stdout with flush guarantee and broken pipe safety.
fn write_json<T: Serialize>(value: &T, pretty: bool) {
    use std::io::Write;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let result = if pretty {
        serde_json::to_writer_pretty(&mut handle, value)
    } else {
        serde_json::to_writer(&mut handle, value)
    };
    match result {
        Ok(()) => {
            let _ = writeln!(handle);
            let _ = handle.flush();
        }
        Err(e) => {
            eprintln!("JSON serialization failed: {}", e);
        }
    }
}
