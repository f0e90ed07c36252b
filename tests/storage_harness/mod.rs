//! Shared test harness for repository and pipeline testing
//!
//! Provides product fixtures whose fields cover every `FieldValue` variant the
//! engine distinguishes (text, integer, float, optional UUID, status), plus
//! the `data_service_tests!` contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod data_service_tests;

use stockroom::entities::Product;
use uuid::Uuid;

/// Build a product with the fields the tests care about; the rest get
/// neutral values
pub fn product(name: &str, sku: &str, price: f64, stock: i64, status: &str) -> Product {
    Product::new(
        name.to_string(),
        status.to_string(),
        sku.to_string(),
        format!("{} description", name),
        None,
        None,
        None,
        price,
        price / 2.0,
        stock,
        10,
        "unit".to_string(),
    )
}

/// Same as [`product`] with a category attached
pub fn product_in(category: Uuid, name: &str, price: f64, stock: i64) -> Product {
    let mut p = product(name, &name.to_uppercase(), price, stock, "active");
    p.category_id = Some(category);
    p
}

/// A small mixed catalog: duplicates in price and stock, mixed-case names,
/// inactive and out-of-stock items
pub fn sample_catalog() -> Vec<Product> {
    vec![
        product("Hex bolt M8", "BOLT-M8", 0.35, 1200, "active"),
        product("hex nut M8", "NUT-M8", 0.10, 15, "active"),
        product("Washer M8", "WSH-M8", 0.05, 5, "inactive"),
        product("Drill 650W", "DRL-650", 89.90, 10, "active"),
        product("Drill bits set", "DRL-BITS", 24.50, 0, "active"),
        product("Angle grinder", "GRD-115", 89.90, 20, "inactive"),
        product("Safety gloves", "GLV-L", 4.20, 15, "active"),
        product("Measuring tape", "TAPE-5M", 7.80, 10, "active"),
    ]
}

/// `n` products with distinct names, prices and stock
pub fn numbered_catalog(n: usize) -> Vec<Product> {
    (0..n)
        .map(|i| {
            product(
                &format!("Item {:03}", i),
                &format!("SKU-{:03}", i),
                1.0 + i as f64,
                (i * 3 % 17) as i64,
                if i % 4 == 0 { "inactive" } else { "active" },
            )
        })
        .collect()
}

pub fn names(products: &[Product]) -> Vec<String> {
    products.iter().map(|p| p.name.clone()).collect()
}

pub fn ids(products: &[Product]) -> Vec<Uuid> {
    products.iter().map(|p| p.id).collect()
}
