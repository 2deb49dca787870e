use crate::models::Vehicle;
use crate::services::listing::{ListingClient, ListingError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    /// Shared between every caller that waited on the same fetch
    #[error("Catalog fetch failed: {0}")]
    Fetch(Arc<ListingError>),
}

/// Read-through cache for the catalog snapshot
///
/// Concurrent misses collapse into a single listing request.
pub struct CatalogCache {
    snapshots: moka::future::Cache<String, Arc<Vec<Vehicle>>>,
    ttl_secs: u64,
}

impl CatalogCache {
    pub fn new(ttl_secs: u64) -> Self {
        let snapshots = moka::future::CacheBuilder::new(4)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { snapshots, ttl_secs }
    }

    /// Return the cached snapshot, fetching it on a miss
    pub async fn catalog(&self, listing: &ListingClient) -> Result<Arc<Vec<Vehicle>>, CacheError> {
        let key = CacheKey::catalog();

        if let Some(snapshot) = self.snapshots.get(&key).await {
            tracing::trace!("Catalog cache hit: {} vehicles", snapshot.len());
            return Ok(snapshot);
        }

        tracing::trace!("Catalog cache miss");
        self.snapshots
            .try_get_with(key, async {
                let vehicles = listing.fetch_vehicles().await?;
                tracing::info!("Cached catalog snapshot of {} vehicles for {}s", vehicles.len(), self.ttl_secs);
                Ok::<_, ListingError>(Arc::new(vehicles))
            })
            .await
            .map_err(CacheError::Fetch)
    }

    /// Drop the snapshot so the next request refetches
    pub async fn invalidate(&self) {
        self.snapshots.invalidate(&CacheKey::catalog()).await;
        tracing::debug!("Invalidated catalog snapshot");
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.snapshots.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build the cache key for the full catalog snapshot
    pub fn catalog() -> String {
        "catalog:all".to_string()
    }
}
