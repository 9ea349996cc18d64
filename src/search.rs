//! Vector-search product source.
//!
//! Thin adapter over the semantic search API the storefront uses as a
//! second product source. Query in, ranked product-like chunks out; the
//! conversion to `Product` fills the storefront's fields from chunk
//! metadata with the same fallbacks the shop applies.

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::catalog::{Category, Product};
use crate::config::CredentialError;

const API_URL: &str = "https://api.mixedbread.com/v1/stores/search";
const USER_AGENT: &str = concat!("vitrine/", env!("CARGO_PKG_VERSION"));

/// Broad default so a blank query still returns general clothing items.
pub const DEFAULT_QUERY: &str = "clothing";

const TOP_K: u32 = 20;
const SCORE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    api_key: String,
    store_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notable_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// One ranked search result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ChunkMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_metadata: Option<ChunkMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<ImageUrl>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchChunk>,
}

impl SearchClient {
    /// Both credentials are required configuration; neither missing one is
    /// discovered mid-request.
    pub fn new(api_key: Option<String>, store_id: Option<String>) -> Result<Self> {
        let Some(api_key) = api_key.filter(|k| !k.is_empty()) else {
            return Err(CredentialError::MissingSearchApiKey.into());
        };
        let Some(store_id) = store_id.filter(|s| !s.is_empty()) else {
            return Err(CredentialError::MissingSearchStoreId.into());
        };
        Ok(Self {
            http: Client::new(),
            api_key,
            store_id,
        })
    }

    /// Run a semantic search against the product store.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchChunk>> {
        let query = normalize_query(query);
        debug!(%query, "vector search request");

        let response = self
            .http
            .post(API_URL)
            .header("User-Agent", USER_AGENT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "query": query,
                "store_identifiers": [self.store_id],
                "top_k": TOP_K,
                "search_options": {
                    "return_metadata": true,
                    "score_threshold": SCORE_THRESHOLD,
                },
            }))
            .send()
            .await
            .context("Failed to reach the search API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Search API {}: {}", status.as_u16(), body);
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .context("Failed to parse search API response")?;
        Ok(parsed.data)
    }
}

fn normalize_query(query: &str) -> &str {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        DEFAULT_QUERY
    } else {
        trimmed
    }
}

/// Convert a search chunk to the storefront's product shape.
pub fn chunk_to_product(chunk: &SearchChunk, index: usize) -> Product {
    let meta = chunk
        .metadata
        .as_ref()
        .or(chunk.generated_metadata.as_ref())
        .cloned()
        .unwrap_or_default();

    let id_suffix = meta
        .filename
        .clone()
        .unwrap_or_else(|| index.to_string());

    Product {
        id: format!("mixedbread-{}", id_suffix),
        name: meta.name.unwrap_or_else(|| "Unknown Product".to_owned()),
        description: meta
            .description
            .or(meta.notable_details)
            .unwrap_or_else(|| "No description available".to_owned()),
        price: meta.price.unwrap_or(0.0),
        image: chunk
            .image_url
            .as_ref()
            .map(|i| i.url.clone())
            .unwrap_or_else(|| "/placeholder-product.jpg".to_owned()),
        // The search store only carries clothing.
        category: Category::Clothing,
        stock: 100,
        featured: false,
        rating: Some(4.5),
        reviews: Some(0),
    }
}

pub fn chunks_to_products(chunks: &[SearchChunk]) -> Vec<Product> {
    chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| chunk_to_product(chunk, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_fail_construction() {
        assert!(SearchClient::new(None, Some("store".to_owned())).is_err());
        assert!(SearchClient::new(Some("key".to_owned()), None).is_err());
        assert!(SearchClient::new(Some("key".to_owned()), Some("store".to_owned())).is_ok());
    }

    #[test]
    fn blank_query_falls_back_to_default() {
        assert_eq!(normalize_query(""), DEFAULT_QUERY);
        assert_eq!(normalize_query("   "), DEFAULT_QUERY);
        assert_eq!(normalize_query(" jacket "), "jacket");
    }

    #[test]
    fn chunk_with_full_metadata_maps_directly() {
        let chunk = SearchChunk {
            score: Some(0.92),
            metadata: Some(ChunkMetadata {
                filename: Some("denim-jacket".to_owned()),
                name: Some("Denim Jacket".to_owned()),
                description: Some("Classic fit.".to_owned()),
                notable_details: None,
                price: Some(59.0),
            }),
            generated_metadata: None,
            image_url: Some(ImageUrl {
                url: "https://img.example/denim.jpg".to_owned(),
            }),
        };

        let product = chunk_to_product(&chunk, 0);
        assert_eq!(product.id, "mixedbread-denim-jacket");
        assert_eq!(product.name, "Denim Jacket");
        assert_eq!(product.description, "Classic fit.");
        assert!((product.price - 59.0).abs() < 1e-9);
        assert_eq!(product.image, "https://img.example/denim.jpg");
        assert_eq!(product.category, Category::Clothing);
    }

    #[test]
    fn generated_metadata_is_the_fallback_source() {
        let chunk = SearchChunk {
            generated_metadata: Some(ChunkMetadata {
                name: Some("Wool Coat".to_owned()),
                notable_details: Some("Heavy weave.".to_owned()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let product = chunk_to_product(&chunk, 3);
        assert_eq!(product.name, "Wool Coat");
        // notable_details backs an absent description.
        assert_eq!(product.description, "Heavy weave.");
        // No filename: index becomes the id.
        assert_eq!(product.id, "mixedbread-3");
    }

    #[test]
    fn empty_chunk_gets_placeholders() {
        let product = chunk_to_product(&SearchChunk::default(), 7);
        assert_eq!(product.id, "mixedbread-7");
        assert_eq!(product.name, "Unknown Product");
        assert_eq!(product.description, "No description available");
        assert_eq!(product.price, 0.0);
        assert_eq!(product.image, "/placeholder-product.jpg");
        assert_eq!(product.stock, 100);
        assert_eq!(product.rating, Some(4.5));
    }

    #[test]
    fn chunks_convert_in_order() {
        let chunks = vec![SearchChunk::default(), SearchChunk::default()];
        let products = chunks_to_products(&chunks);
        assert_eq!(products[0].id, "mixedbread-0");
        assert_eq!(products[1].id, "mixedbread-1");
    }
}
