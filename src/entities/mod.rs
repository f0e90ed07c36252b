//! Catalog entities: products, categories, warehouses, providers, stock
//! movements and user-defined extra fields

pub mod macros;

pub mod category;
pub mod custom_field;
pub mod movement;
pub mod product;
pub mod provider;
pub mod warehouse;

pub use category::Category;
pub use custom_field::CustomField;
pub use movement::{Movement, MovementKind};
pub use product::Product;
pub use provider::Provider;
pub use warehouse::Warehouse;
