//! Entity traits defining how the query engine reads catalog items

use crate::core::field::{FieldValue, ItemId};
use crate::core::query::SortKey;

/// Base trait for every listed entity.
///
/// All entities have:
/// - id: Unique identifier (integer for fixtures, string for remote rows)
/// - name: Display name, always a text-search target
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "products", "artisans")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "product", "artisan")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> ItemId;

    /// Get the display name
    fn name(&self) -> &str;
}

/// Field accessors the generic engine uses to filter and sort an entity type.
///
/// Each listing page used to carry its own copy of the filter and sort logic.
/// Implementing this trait is the only per-entity work: the engine itself is
/// shared.
pub trait CatalogItem: Entity {
    /// Additional text targets matched by the search box besides `name`
    fn search_fields(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Whether the item belongs to the category with the given label
    fn matches_category(&self, label: &str) -> bool;

    /// Location used by the location filter, if the entity has one
    fn location(&self) -> Option<&str> {
        None
    }

    /// Multi-valued tags (materials, crafts)
    fn tags(&self) -> &[String];

    /// Value checked against the numeric range filter (price or rating)
    fn range_value(&self) -> f64;

    /// Stock / availability signal
    fn in_stock(&self) -> bool {
        true
    }

    /// Whether the item accepts custom orders
    fn accepts_custom_orders(&self) -> bool {
        false
    }

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Sort keys this entity understands; other keys fall back to `Featured`
    fn sort_keys() -> &'static [SortKey];
}
