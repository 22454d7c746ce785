//! Demo composition root: build the seeded in-memory system, print the
//! inventory reports, and show the negative-stock guard rejecting an
//! interactive overdraw.

mod telemetry;

use anyhow::Context;

use stockbook_catalog::{BinId, ProductId, WarehouseId};
use stockbook_fixtures::DemoSystem;
use stockbook_ledger::{MovementRequest, TransactionType};
use stockbook_reports::{dashboard_summary, ledger_csv, stock_summary_csv, valuation_csv};

fn main() -> anyhow::Result<()> {
    telemetry::init();

    let system = DemoSystem::build().context("failed to seed demo system")?;
    let products = system.catalog.products();

    tracing::info!(
        movements = system.ledger.len(),
        orders = system.sales.orders().len(),
        shipments = system.sales.shipments().len(),
        "demo system seeded"
    );

    println!("== Stock summary ==");
    println!("{}", stock_summary_csv(&system.ledger.stock_summary()));

    println!("\n== FIFO valuation ==");
    let valuation = system.ledger.fifo_valuation(&products);
    println!("{}", valuation_csv(&valuation));
    let grand_total: i64 = valuation.iter().map(|row| row.value).sum();
    println!("grand total: {grand_total} cents");

    println!("\n== Reorder alerts ==");
    for alert in system.ledger.reorder_alerts(&products) {
        println!(
            "{} ({}): {} on hand, reorder at {}",
            alert.name, alert.sku, alert.on_hand, alert.reorder_point
        );
    }

    println!("\n== Dashboard ==");
    let dashboard = dashboard_summary(&products, &system.ledger);
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    // The guard in action: warehouse 1 / bin 1 holds 17 laptops.
    println!("\n== Overdraw demo ==");
    let overdraw = MovementRequest::new(
        ProductId(1),
        WarehouseId(1),
        BinId(1),
        TransactionType::ISSUE,
        1_000,
        120_000,
    );
    match system.ledger.append(overdraw) {
        Ok(movement) => println!("unexpectedly accepted: {}", movement.id),
        Err(err) => println!("rejected as expected: {err}"),
    }

    println!("\n== Ledger ==");
    println!("{}", ledger_csv(&system.ledger.entries()));

    Ok(())
}
