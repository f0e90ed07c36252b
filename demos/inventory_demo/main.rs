//! Inventory Demo
//!
//! Seeds an in-memory product catalog, runs a few table views through the
//! Filter → Sort → Paginate pipeline and books a purchase invoice against it.
//!
//! Run with `cargo run --example inventory_demo`, optionally with
//! `RUST_LOG=stockroom=debug` to see the pipeline trace.

use anyhow::Result;
use stockroom::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = EngineConfig::default_config();
    init_tracing(config.log_filter.as_deref().unwrap_or("info"));

    let warehouse = Warehouse::new(
        "Main warehouse".to_string(),
        "active".to_string(),
        "WH-01".to_string(),
        "Industrial park, bay 4".to_string(),
        5000,
    );

    let products = InMemoryDataService::<Product>::new();
    populate_catalog(&products, warehouse.id).await?;

    println!("📦 {} products in {}", products.len(), warehouse.name);

    // Default view: configured sort, first page
    let page = products.query(&config.initial_query("products"));
    print_page("All products (name:asc)", &page);

    // A view built from raw query-string parameters
    let params = QueryParams {
        page: 1,
        limit: Some(3),
        filter: Some(r#"{"status": "active", "stock<=": 15}"#.to_string()),
        sort: Some("stock:asc".to_string()),
    };
    let page = products.query(&config.list_query_for("products", &params));
    print_page("Active, low stock", &page);

    // Purchase invoice for the low-stock items
    let mut invoice = Invoice::new("FC-0001", InvoiceKind::Purchase, None);
    for product in &page.items {
        let input = LineItemInput::new(product.cost, 50.0, 5.0, 19.0)
            .with_product(product.id, product.name.clone());
        invoice.add_line(&input)?;
    }

    println!("\n🧾 Invoice {}", invoice.number);
    for line in &invoice.lines {
        println!(
            "  {:<20} {:>6} x {:>8.2}  -{:>5.1}%  +{:>4.1}%  = {:>10.2}",
            line.description,
            line.quantity,
            line.price,
            line.discount_percent,
            line.tax_rate_percent,
            line.total
        );
    }
    let totals = invoice.totals();
    println!("  subtotal {:>10.2}", totals.subtotal);
    println!("  discount {:>10.2}", totals.discount_amount);
    println!("  tax      {:>10.2}", totals.tax_amount);
    println!("  total    {:>10.2}", totals.total);

    // Book the stock entries
    for movement in invoice.stock_movements(Some(warehouse.id)) {
        if let Some(mut product) = products.get(&movement.product_id).await? {
            product.stock += movement.signed_quantity();
            product.touch();
            products.update(&movement.product_id, product).await?;
        }
    }

    let restocked = products.query(
        &ListQuery::default()
            .with_filter(FilterSpec::new().with("stock", FieldFilter::between(50, 100)))
            .with_sort(SortSpec::desc("stock")),
    );
    print_page("Restocked", &restocked);

    Ok(())
}

async fn populate_catalog(products: &InMemoryDataService<Product>, warehouse_id: Uuid) -> Result<()> {
    let seed = [
        ("Hex bolt M8", "BOLT-M8", 0.35, 0.12, 1200, "active"),
        ("Hex nut M8", "NUT-M8", 0.10, 0.03, 15, "active"),
        ("Washer M8", "WSH-M8", 0.05, 0.01, 5, "inactive"),
        ("Drill 650W", "DRL-650", 89.90, 52.00, 10, "active"),
        ("Drill bits set", "DRL-BITS", 24.50, 11.00, 0, "active"),
        ("Angle grinder", "GRD-115", 64.00, 38.50, 20, "inactive"),
        ("Safety gloves", "GLV-L", 4.20, 1.60, 15, "active"),
        ("Measuring tape", "TAPE-5M", 7.80, 3.10, 40, "active"),
    ];

    for (name, sku, price, cost, stock, status) in seed {
        let product = Product::new(
            name.to_string(),
            status.to_string(),
            sku.to_string(),
            String::new(),
            None,
            Some(warehouse_id),
            None,
            price,
            cost,
            stock,
            10,
            "unit".to_string(),
        );
        products.create(product).await?;
    }

    Ok(())
}

fn print_page(title: &str, page: &Page<Product>) {
    let meta = &page.pagination;
    println!(
        "\n{} (page {}/{}, {} matching)",
        title,
        meta.page,
        meta.total_pages.max(1),
        meta.total
    );

    if page.is_empty() {
        println!("  no records");
        return;
    }

    for p in &page.items {
        println!(
            "  {:<10} {:<16} {:>8.2} {:>6} {}",
            p.sku, p.name, p.price, p.stock, p.status
        );
    }
}
