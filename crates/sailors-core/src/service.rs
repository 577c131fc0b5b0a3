//! ============================================================================
//! Services - Fetch-then-transform pipelines behind each screen
//! ============================================================================
//! Each service owns a [`StateStore`] and refreshes it from injected
//! collaborators:
//!
//! ```text
//! InventoryService:  DefinitionCache ─┐
//!                                      ├─ try_join ─▶ join_inventory ─▶ StateStore
//!                    QueryService ────┘
//!
//! AnomalyService:    QueryService ─▶ build_anomaly_list(origin) ─▶ StateStore
//! ```
//!
//! A failed refresh is returned to the caller and recorded in the store,
//! while the previously published data stays visible.
//! ============================================================================

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::anomaly::build_anomaly_list;
use crate::catalog::DefinitionCache;
use crate::config::{DEFAULT_ANOMALY_LIMIT, DEFAULT_INVENTORY_LIMIT};
use crate::error::{Result, SailorsError};
use crate::geo::{GeoPoint, DEFAULT_ANOMALY_RADIUS_KM};
use crate::inventory::join_inventory;
use crate::models::{Classification, Profile};
use crate::query::{fetch_records, QueryService, TableQuery};
use crate::state::{StateStore, ViewState};
use crate::types::{InventoryItem, LinkedAnomaly, LinkedAnomalyRow, RawInventory};

/// `inventory` read used by the inventory screen
pub fn inventory_query(limit: usize) -> TableQuery {
    TableQuery::new("inventory").select("id, item, owner").limit(limit)
}

/// `linked_anomalies` read with the anomaly embedded
pub fn linked_anomalies_query(limit: usize) -> TableQuery {
    TableQuery::new("linked_anomalies")
        .select("id, anomaly(id, content)")
        .limit(limit)
}

/// Most recent classifications
pub fn classifications_query(limit: usize) -> TableQuery {
    TableQuery::new("classifications").limit(limit)
}

/// Single profile row by user id
pub fn profile_query(user_id: Uuid) -> TableQuery {
    TableQuery::new("profiles").eq("id", user_id).limit(1)
}

// ============================================================================
// Inventory
// ============================================================================

/// Loads the player's inventory and resolves it against the item catalog
pub struct InventoryService {
    query: Arc<dyn QueryService>,
    definitions: Arc<DefinitionCache>,
    limit: usize,
    state: StateStore<Vec<InventoryItem>>,
}

impl InventoryService {
    pub fn new(query: Arc<dyn QueryService>, definitions: Arc<DefinitionCache>) -> Self {
        Self {
            query,
            definitions,
            limit: DEFAULT_INVENTORY_LIMIT,
            state: StateStore::default(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Fetch definitions and inventory rows concurrently, then join
    pub async fn refresh(&self) -> Result<()> {
        let query = inventory_query(self.limit);
        let outcome = async {
            let (definitions, raw) = tokio::try_join!(
                self.definitions.get_or_fetch(),
                fetch_records::<RawInventory>(self.query.as_ref(), &query),
            )?;
            Ok::<_, SailorsError>(join_inventory(&raw, &definitions))
        }
        .await;

        if let Ok(items) = &outcome {
            info!("Inventory refreshed: {} items", items.len());
        }
        self.state.apply(outcome)
    }

    pub fn state(&self) -> &StateStore<Vec<InventoryItem>> {
        &self.state
    }

    pub fn snapshot(&self) -> ViewState<Vec<InventoryItem>> {
        self.state.snapshot()
    }
}

// ============================================================================
// Anomalies
// ============================================================================

/// Loads linked anomalies and scatters them around an origin
pub struct AnomalyService {
    query: Arc<dyn QueryService>,
    radius_km: f64,
    limit: usize,
    state: StateStore<Vec<LinkedAnomaly>>,
}

impl AnomalyService {
    pub fn new(query: Arc<dyn QueryService>) -> Self {
        Self {
            query,
            radius_km: DEFAULT_ANOMALY_RADIUS_KM,
            limit: DEFAULT_ANOMALY_LIMIT,
            state: StateStore::default(),
        }
    }

    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub async fn refresh(&self, origin: GeoPoint) -> Result<()> {
        let query = linked_anomalies_query(self.limit);
        let outcome = fetch_records::<LinkedAnomalyRow>(self.query.as_ref(), &query)
            .await
            .map(|rows| build_anomaly_list(&rows, origin, self.radius_km));

        if let Ok(list) = &outcome {
            info!("Anomalies refreshed: {} around {}", list.len(), origin);
        }
        self.state.apply(outcome)
    }

    pub fn state(&self) -> &StateStore<Vec<LinkedAnomaly>> {
        &self.state
    }

    pub fn snapshot(&self) -> ViewState<Vec<LinkedAnomaly>> {
        self.state.snapshot()
    }
}

/// Fetch the most recent classifications
pub async fn fetch_classifications(
    query: &dyn QueryService,
    limit: usize,
) -> Result<Vec<Classification>> {
    fetch_records(query, &classifications_query(limit)).await
}

/// Fetch a player's profile; `None` when no row matches
pub async fn fetch_profile(query: &dyn QueryService, user_id: Uuid) -> Result<Option<Profile>> {
    let mut rows: Vec<Profile> = fetch_records(query, &profile_query(user_id)).await?;
    Ok(if rows.is_empty() {
        None
    } else {
        Some(rows.swap_remove(0))
    })
}
