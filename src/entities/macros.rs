//! Macros for reducing boilerplate when defining catalog entities
//!
//! Every catalog record carries the same base fields and needs the same
//! `Entity`/`Data` implementations; only its own fields differ.

/// Create a catalog entity with automatic trait implementations
///
/// The generated `field_value` exposes the base fields (`id`, `type`,
/// `created_at`, `updated_at`, `status`, `name`) and every declared field, so
/// the entity can be filtered, sorted and searched by any of them.
///
/// Every declared field type must convert into
/// [`FieldValue`](crate::core::field::FieldValue).
///
/// # Example
///
/// ```rust,ignore
/// use stockroom::prelude::*;
///
/// impl_data_entity!(
///     Product,
///     "product",
///     "products",
///     ["name", "sku"],
///     {
///         sku: String,
///         price: f64,
///         stock: i64,
///     }
/// );
///
/// let bolt = Product::new(
///     "Hex bolt".to_string(),
///     "active".to_string(),
///     "BOLT-M8".to_string(),
///     0.35,
///     1200,
/// );
/// assert_eq!(bolt.field_value("stock"), Some(FieldValue::Integer(1200)));
/// ```
#[macro_export]
macro_rules! impl_data_entity {
    (
        $type:ident,
        $type_name:expr,
        $plural_name:expr,
        [ $( $indexed_field:expr ),* $(,)? ],
        {
            $( $specific_field:ident : $specific_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique identifier for this entity
            pub id: ::uuid::Uuid,

            /// Type of the entity
            #[serde(rename = "type")]
            pub entity_type: String,

            /// When this entity was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this entity was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,

            /// Current status of the entity ("active" / "inactive")
            pub status: String,

            /// Display name
            pub name: String,
            $( pub $specific_field : $specific_type ),*
        }

        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural_name
            }

            fn resource_name_singular() -> &'static str {
                $type_name
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn entity_type(&self) -> &str {
                &self.entity_type
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn status(&self) -> &str {
                &self.status
            }
        }

        impl $crate::core::entity::Data for $type {
            fn name(&self) -> &str {
                &self.name
            }

            fn indexed_fields() -> &'static [&'static str] {
                &[ $( $indexed_field ),* ]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                use $crate::core::field::FieldValue;

                match field {
                    "id" => return Some(FieldValue::Uuid(self.id)),
                    "type" | "entity_type" => return Some(FieldValue::String(self.entity_type.clone())),
                    "created_at" => return Some(FieldValue::DateTime(self.created_at)),
                    "updated_at" => return Some(FieldValue::DateTime(self.updated_at)),
                    "status" => return Some(FieldValue::String(self.status.clone())),
                    "name" => return Some(FieldValue::String(self.name.clone())),
                    _ => {}
                }

                $(
                    if field == stringify!($specific_field) {
                        return Some(FieldValue::from(self.$specific_field.clone()));
                    }
                )*

                None
            }
        }

        impl $type {
            /// Create a new instance of this entity
            #[allow(clippy::too_many_arguments)]
            pub fn new(
                name: String,
                status: String,
                $( $specific_field: $specific_type ),*
            ) -> Self {
                let now = ::chrono::Utc::now();
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    entity_type: $type_name.to_string(),
                    created_at: now,
                    updated_at: now,
                    status,
                    name,
                    $( $specific_field ),*
                }
            }

            /// Update the updated_at timestamp to now
            pub fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }

            /// Change the entity status
            pub fn set_status(&mut self, status: impl Into<String>) {
                self.status = status.into();
                self.touch();
            }
        }
    };
}
