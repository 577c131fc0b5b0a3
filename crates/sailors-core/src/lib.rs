//! ============================================================================
//! SAILORS-CORE: Star Sailors client core
//! ============================================================================
//! Data shaping behind the Star Sailors screens:
//! - Synthetic anomaly coordinates around the player's origin
//! - Inventory rows joined onto the item catalog, grouped for display
//! - Query service / catalog interfaces and their HTTP implementations
//! - Explicit view state with change notification
//! ============================================================================

pub mod anomaly;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geo;
pub mod inventory;
pub mod location;
pub mod map;
pub mod models;
pub mod query;
pub mod service;
pub mod state;
pub mod types;

// Re-export main types for convenience
pub use types::*;
pub use anomaly::{build_anomaly_list, build_anomaly_list_with};
pub use catalog::{CatalogSource, DefinitionCache, HttpCatalog};
pub use config::SailorsConfig;
pub use error::{Result, SailorsError};
pub use geo::{great_circle_distance_km, synthesize, synthesize_with, GeoPoint};
pub use inventory::{group_by_initial, index_definitions, join_inventory, section_titles};
pub use location::{best_effort_location, FixedLocation, LocationProvider};
pub use query::{fetch_records, QueryService, RestQueryService, TableQuery};
pub use service::{AnomalyService, InventoryService};
pub use state::{StateStore, ViewState};
