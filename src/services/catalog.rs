use crate::core::filters::{filter_restaurants, RestaurantFilter};
use crate::models::Restaurant;
use crate::services::cache::{CacheKey, CacheManager};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while reading the restaurant catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Catalog API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid catalog data: {0}")]
    InvalidData(String),

    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}

/// Remote listings come either as a bare array or wrapped in an object
#[derive(Deserialize)]
#[serde(untagged)]
enum RestaurantListPayload {
    Bare(Vec<Restaurant>),
    Wrapped { restaurants: Vec<Restaurant> },
}

impl RestaurantListPayload {
    fn into_vec(self) -> Vec<Restaurant> {
        match self {
            RestaurantListPayload::Bare(list) => list,
            RestaurantListPayload::Wrapped { restaurants } => restaurants,
        }
    }
}

/// HTTP-backed restaurant source with cached responses
struct RemoteCatalog {
    base_url: String,
    client: Client,
    cache: Arc<CacheManager>,
}

enum Backend {
    Static(Vec<Restaurant>),
    Remote(RemoteCatalog),
}

/// Source of restaurant records
///
/// Either a fixed list (seed file or tests) or a remote HTTP endpoint
/// exposing `GET /restaurants` and `GET /restaurants/{id}`.
pub struct RestaurantCatalog {
    backend: Backend,
}

impl RestaurantCatalog {
    /// Catalog over a fixed list of restaurants
    pub fn in_memory(restaurants: Vec<Restaurant>) -> Self {
        Self {
            backend: Backend::Static(restaurants),
        }
    }

    /// Load a JSON seed file (array of restaurants or `{"restaurants": [...]}`)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let payload: RestaurantListPayload = serde_json::from_str(&raw).map_err(|e| {
            CatalogError::InvalidData(format!("{}: {}", path.display(), e))
        })?;
        let restaurants = payload.into_vec();

        tracing::info!("Loaded {} restaurants from {}", restaurants.len(), path.display());

        Ok(Self::in_memory(restaurants))
    }

    /// Catalog served by a remote API
    pub fn remote(
        base_url: String,
        cache: Arc<CacheManager>,
        timeout_secs: u64,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            backend: Backend::Remote(RemoteCatalog {
                base_url,
                client,
                cache,
            }),
        })
    }

    pub fn source_tag(&self) -> &'static str {
        match self.backend {
            Backend::Static(_) => "static",
            Backend::Remote(_) => "remote",
        }
    }

    /// All restaurants, in catalog order
    pub async fn list(&self) -> Result<Vec<Restaurant>, CatalogError> {
        match &self.backend {
            Backend::Static(restaurants) => Ok(restaurants.clone()),
            Backend::Remote(remote) => remote.list().await,
        }
    }

    /// A single restaurant by id
    pub async fn get(&self, id: &str) -> Result<Restaurant, CatalogError> {
        match &self.backend {
            Backend::Static(restaurants) => restaurants
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| CatalogError::NotFound(format!("Restaurant {} not found", id))),
            Backend::Remote(remote) => remote.get(id).await,
        }
    }

    /// Restaurants passing the browse filter, in catalog order
    pub async fn browse(&self, filter: &RestaurantFilter) -> Result<Vec<Restaurant>, CatalogError> {
        let restaurants = self.list().await?;
        Ok(filter_restaurants(restaurants, filter))
    }
}

impl RemoteCatalog {
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn list(&self) -> Result<Vec<Restaurant>, CatalogError> {
        let cache_key = CacheKey::restaurants();
        if let Ok(cached) = self.cache.get::<Vec<Restaurant>>(&cache_key).await {
            return Ok(cached);
        }

        let url = self.url("restaurants");
        tracing::debug!("Fetching restaurants from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::ApiError(format!(
                "Failed to fetch restaurants: {}",
                response.status()
            )));
        }

        let payload: RestaurantListPayload = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidData(format!("Failed to parse restaurants: {}", e)))?;
        let restaurants = payload.into_vec();

        if let Err(e) = self.cache.set(&cache_key, &restaurants).await {
            tracing::warn!("Failed to cache restaurant list: {}", e);
        }

        tracing::debug!("Fetched {} restaurants", restaurants.len());
        Ok(restaurants)
    }

    async fn get(&self, id: &str) -> Result<Restaurant, CatalogError> {
        let cache_key = CacheKey::restaurant(id);
        if let Ok(cached) = self.cache.get::<Restaurant>(&cache_key).await {
            return Ok(cached);
        }

        let url = self.url(&format!("restaurants/{}", urlencoding::encode(id)));
        tracing::debug!("Fetching restaurant {} from: {}", id, url);

        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(CatalogError::NotFound(format!("Restaurant {} not found", id)));
            }
            status if !status.is_success() => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read body".to_string());
                tracing::error!("Failed to fetch restaurant {}: {} - {}", id, status, body);
                return Err(CatalogError::ApiError(format!(
                    "Failed to fetch restaurant: {}",
                    status
                )));
            }
            _ => {}
        }

        let restaurant: Restaurant = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidData(format!("Failed to parse restaurant: {}", e)))?;

        if let Err(e) = self.cache.set(&cache_key, &restaurant).await {
            tracing::warn!("Failed to cache restaurant {}: {}", id, e);
        }

        Ok(restaurant)
    }
}
