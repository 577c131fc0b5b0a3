//! ============================================================================
//! Inventory - Joining owned rows onto the item catalog
//! ============================================================================
//! Inventory rows only reference items by id. The display list is built by
//! left-joining them onto the catalog, falling back to a placeholder when an
//! item is missing, then grouping by leading letter for the section index.
//! ============================================================================

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::types::{InventoryItem, ItemDefinition, RawInventory};

/// Catalog lookup table keyed by item id
pub type DefinitionTable = HashMap<i64, ItemDefinition>;

/// Index catalog entries by id. A repeated id keeps the later entry.
pub fn index_definitions(definitions: Vec<ItemDefinition>) -> DefinitionTable {
    let mut table = HashMap::with_capacity(definitions.len());
    for def in definitions {
        if let Some(previous) = table.insert(def.id, def) {
            warn!("Duplicate item definition id {} ({})", previous.id, previous.name);
        }
    }
    table
}

/// Resolve each inventory row against the catalog, preserving input order.
///
/// Rows whose item is absent or unknown become `"Unknown Item {item}"`
/// (`-1` when the row has no item) with an empty icon.
pub fn join_inventory(raw: &[RawInventory], definitions: &DefinitionTable) -> Vec<InventoryItem> {
    let items: Vec<InventoryItem> = raw
        .iter()
        .map(|row| match row.item.and_then(|id| definitions.get(&id)) {
            Some(def) => InventoryItem {
                id: row.id,
                name: def.name.clone(),
                icon_url: def.icon_url.clone(),
            },
            None => InventoryItem {
                id: row.id,
                name: format!("Unknown Item {}", row.item.unwrap_or(-1)),
                icon_url: String::new(),
            },
        })
        .collect();

    debug!(
        "Joined {} inventory rows against {} definitions",
        items.len(),
        definitions.len()
    );
    items
}

/// Section key for an item: its uppercased first `char` (not grapheme)
fn section_key(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Group items by uppercased first letter.
///
/// Keys iterate in ascending order. Within a section items are sorted by
/// name with plain byte-wise string comparison, so `"Apple"` sorts before
/// `"apple"`. The sort is stable: identical names keep their join order.
///
/// The key is taken from the first Unicode scalar value, so a decomposed
/// `"e\u{301}clair"` files under `"E"` rather than `"É"`; precomposed
/// `"éclair"` files under `"É"`.
pub fn group_by_initial(items: &[InventoryItem]) -> BTreeMap<String, Vec<InventoryItem>> {
    let mut groups: BTreeMap<String, Vec<InventoryItem>> = BTreeMap::new();
    for item in items {
        groups
            .entry(section_key(&item.name))
            .or_default()
            .push(item.clone());
    }
    for section in groups.values_mut() {
        section.sort_by(|a, b| a.name.cmp(&b.name));
    }
    groups
}

/// Section titles in ascending order
pub fn section_titles(groups: &BTreeMap<String, Vec<InventoryItem>>) -> Vec<String> {
    groups.keys().cloned().collect()
}
