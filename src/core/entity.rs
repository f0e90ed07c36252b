//! Entity traits defining the core abstraction for all catalog records

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for all entities in the catalog.
///
/// All entities have:
/// - id: Unique identifier, used for selection and keying
/// - type: Entity type name (e.g., "product", "warehouse")
/// - created_at / updated_at: timestamps
/// - status: "active" or "inactive"
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name (e.g., "products", "categories")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "product", "category")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the entity type name
    fn entity_type(&self) -> &str;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Get the entity status
    fn status(&self) -> &str;

    /// Check if the entity is active
    fn is_active(&self) -> bool {
        self.status().eq_ignore_ascii_case("active")
    }
}

/// Trait for data entities that represent concrete catalog rows.
///
/// `field_value` is the accessor the filter/sort engine works through: it maps
/// a field name to a typed value, so the engine never needs reflection.
pub trait Data: Entity {
    /// Get the display name of this entity
    fn name(&self) -> &str;

    /// Fields searched by free-text lookups
    fn indexed_fields() -> &'static [&'static str];

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}
