use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::{load_catalog, Catalog, CatalogSource};
use crate::error::CatalogError;

struct CachedCatalog {
    catalog: Arc<Catalog>,
    fetched_at: Instant,
}

/// Keeps the last successfully parsed catalog for `ttl`. Once stale, the next
/// request re-fetches; if that fails the previous catalog keeps being served.
pub struct CatalogCache {
    source: CatalogSource,
    ttl: Duration,
    fetch_timeout: Duration,
    entry: Option<CachedCatalog>,
}

impl CatalogCache {
    pub fn new(source: CatalogSource, ttl: Duration, fetch_timeout: Duration) -> Self {
        CatalogCache {
            source,
            ttl,
            fetch_timeout,
            entry: None,
        }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub fn is_stale(&self) -> bool {
        match &self.entry {
            Some(entry) => entry.fetched_at.elapsed() >= self.ttl,
            None => true,
        }
    }

    pub async fn get(&mut self) -> Result<Arc<Catalog>, CatalogError> {
        if let Some(entry) = &self.entry {
            if !self.is_stale() {
                debug!(source = %self.source, "Serving cached catalog");
                return Ok(Arc::clone(&entry.catalog));
            }
        }
        self.refresh().await
    }

    /// Fetches now, regardless of age.
    pub async fn refresh(&mut self) -> Result<Arc<Catalog>, CatalogError> {
        match load_catalog(&self.source, self.fetch_timeout).await {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                self.entry = Some(CachedCatalog {
                    catalog: Arc::clone(&catalog),
                    fetched_at: Instant::now(),
                });
                Ok(catalog)
            }
            Err(e) => match &self.entry {
                Some(entry) => {
                    warn!(source = %self.source, error = %e, "Catalog refresh failed, keeping previous catalog");
                    Ok(Arc::clone(&entry.catalog))
                }
                None => Err(e),
            },
        }
    }
}
