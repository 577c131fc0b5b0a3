//! ============================================================================
//! Item Catalog - Gameplay item definitions
//! ============================================================================
//! The catalog endpoint returns every item definition as one JSON array.
//! It changes rarely, so [`DefinitionCache`] fetches it once per session and
//! hands out the indexed table until invalidated.
//! ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{Result, SailorsError};
use crate::inventory::{index_definitions, DefinitionTable};
use crate::types::ItemDefinition;

/// Public gameplay catalog endpoint
pub const DEFAULT_CATALOG_URL: &str = "https://starsailors.space/api/gameplay/inventory";

/// Source of item definitions
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_definitions(&self) -> Result<Vec<ItemDefinition>>;
}

/// [`CatalogSource`] backed by the HTTP catalog endpoint
pub struct HttpCatalog {
    client: Client,
    url: String,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_definitions(&self) -> Result<Vec<ItemDefinition>> {
        debug!("Fetching item catalog from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SailorsError::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| SailorsError::Decode(format!("item catalog: {}", e)))
    }
}

/// Session-scoped cache of the indexed catalog
pub struct DefinitionCache {
    source: Arc<dyn CatalogSource>,
    table: RwLock<Option<Arc<DefinitionTable>>>,
}

impl DefinitionCache {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            table: RwLock::new(None),
        }
    }

    /// Return the cached table, fetching it on first use.
    /// A failed fetch leaves the cache empty so the next call retries.
    pub async fn get_or_fetch(&self) -> Result<Arc<DefinitionTable>> {
        if let Some(table) = self.table.read().await.as_ref() {
            return Ok(Arc::clone(table));
        }

        let mut slot = self.table.write().await;
        // Another caller may have filled it while we waited for the lock
        if let Some(table) = slot.as_ref() {
            return Ok(Arc::clone(table));
        }

        let definitions = self.source.fetch_definitions().await?;
        let table = Arc::new(index_definitions(definitions));
        info!("Item catalog loaded: {} definitions", table.len());
        *slot = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Cached table, if already loaded
    pub async fn cached(&self) -> Option<Arc<DefinitionTable>> {
        self.table.read().await.clone()
    }

    /// Drop the cached table so the next read refetches
    pub async fn invalidate(&self) {
        *self.table.write().await = None;
        debug!("Item catalog cache invalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingCatalog {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl CatalogSource for CountingCatalog {
        async fn fetch_definitions(&self) -> Result<Vec<ItemDefinition>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SailorsError::Network("offline".into()));
            }
            Ok(serde_json::from_str(
                r#"[{"id": 1, "name": "Telescope", "description": "", "icon_url": "t.png", "ItemCategory": "Structure"}]"#,
            )
            .unwrap())
        }
    }

    #[test]
    fn test_definition_decodes_catalog_shape() {
        let json = r#"[{
            "id": 12,
            "name": "Rover",
            "description": "Ground explorer",
            "cost": 5,
            "icon_url": "https://cdn.example/rover.png",
            "ItemCategory": "Automaton",
            "parentItem": 3,
            "itemLevel": 2,
            "locationType": "Surface",
            "recipe": { "11": 2, "14": 1 },
            "gif": null
        }]"#;
        let defs: Vec<ItemDefinition> = serde_json::from_str(json).unwrap();
        let rover = &defs[0];
        assert_eq!(rover.category, "Automaton");
        assert_eq!(rover.parent_item, Some(3));
        assert_eq!(rover.item_level, Some(2));
        assert_eq!(rover.location_type.as_deref(), Some("Surface"));
        assert_eq!(rover.recipe.as_ref().unwrap()["11"], 2);
        assert!(rover.gif.is_none());
    }

    #[test]
    fn test_default_url() {
        assert_eq!(HttpCatalog::default().url(), DEFAULT_CATALOG_URL);
    }

    #[tokio::test]
    async fn test_cache_fetches_once() {
        let source = Arc::new(CountingCatalog {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let cache = DefinitionCache::new(source.clone());

        assert!(cache.cached().await.is_none());
        let first = cache.get_or_fetch().await.unwrap();
        let second = cache.get_or_fetch().await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first[&1].name, "Telescope");
    }

    #[tokio::test]
    async fn test_invalidate_refetches() {
        let source = Arc::new(CountingCatalog {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let cache = DefinitionCache::new(source.clone());

        cache.get_or_fetch().await.unwrap();
        cache.invalidate().await;
        cache.get_or_fetch().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_not_cached() {
        let source = Arc::new(CountingCatalog {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let cache = DefinitionCache::new(source.clone());

        assert!(cache.get_or_fetch().await.unwrap_err().is_network());
        assert!(cache.get_or_fetch().await.is_err());
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert!(cache.cached().await.is_none());
    }
}
