//! ============================================================================
//! Core Types for Star Sailors
//! ============================================================================
//! Records as they arrive from the query service and catalog endpoint, and
//! the display-ready shapes the client builds from them.
//! ============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::GeoPoint;

// ============================================================================
// Anomalies
// ============================================================================

/// Anomaly as selected through `linked_anomalies` (`anomaly(id, content)`).
/// The backend stores no location for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRow {
    pub id: i64,
    #[serde(default)]
    pub content: Option<String>,
}

/// Row of the `linked_anomalies` table with its anomaly embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedAnomalyRow {
    pub id: i64,
    pub anomaly: AnomalyRow,
}

/// Anomaly with a client-side synthetic coordinate attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    pub id: i64,
    pub content: Option<String>,
    /// Synthesized for display, never authoritative
    pub coordinate: GeoPoint,
}

/// Join record between the current user and an anomaly
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedAnomaly {
    pub id: i64,
    pub anomaly: Anomaly,
}

// ============================================================================
// Inventory
// ============================================================================

/// Item definition from the gameplay catalog endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: Option<i64>,
    #[serde(default)]
    pub icon_url: String,
    #[serde(rename = "ItemCategory", default)]
    pub category: String,
    #[serde(rename = "parentItem", default)]
    pub parent_item: Option<i64>,
    #[serde(rename = "itemLevel", default)]
    pub item_level: Option<i64>,
    #[serde(rename = "locationType", default)]
    pub location_type: Option<String>,
    /// Ingredient name -> quantity
    #[serde(default)]
    pub recipe: Option<BTreeMap<String, i64>>,
    #[serde(default)]
    pub gif: Option<String>,
}

/// Row of the `inventory` table (`select=id,item,owner`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInventory {
    pub id: i64,
    /// Foreign key into the item catalog
    #[serde(default)]
    pub item: Option<i64>,
    #[serde(default)]
    pub owner: Option<Uuid>,
}

/// Inventory row resolved against the catalog, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    /// Empty when the item could not be resolved
    pub icon_url: String,
}
