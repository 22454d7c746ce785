//! Canonical seed tables.

use chrono::NaiveDate;

use stockbook_catalog::{Bin, BinId, Catalog, Product, ProductId, Warehouse, WarehouseId};
use stockbook_core::DomainResult;
use stockbook_ledger::{MovementRequest, ReferenceType, TransactionType};
use stockbook_parties::{ContactInfo, Party, PartyDirectory, PartyId, PartyRole, PartyStatus};
use stockbook_sales::{CustomerSnapshot, NewOrder, NewOrderLine, OrderStatus, SalesDesk, ShippingStatus};

fn product(
    id: u32,
    sku: &str,
    name: &str,
    cost_price: i64,
    selling_price: i64,
    min_stock: i64,
    reorder_point: i64,
    batch_tracked: bool,
    serial_tracked: bool,
) -> Product {
    Product {
        id: ProductId(id),
        sku: sku.to_string(),
        name: name.to_string(),
        uom: "PCS".to_string(),
        cost_price,
        selling_price,
        min_stock,
        reorder_point,
        batch_tracked,
        serial_tracked,
    }
}

/// Six products, two warehouses, five bins.
pub fn seed_catalog(catalog: &Catalog) -> DomainResult<()> {
    for p in [
        product(1, "LAP-001", "Laptop Pro 16\"", 120_000, 159_900, 5, 10, false, true),
        product(2, "MON-24", "24\" Monitor", 18_000, 24_900, 8, 15, false, false),
        product(3, "KBD-MECH", "Mechanical Keyboard", 8_500, 12_900, 20, 30, false, false),
        product(4, "MOUSE-G", "Gaming Mouse", 4_500, 7_900, 25, 40, false, false),
        product(5, "RAM-16GB", "16GB RAM Stick", 7_500, 11_900, 10, 20, true, false),
        product(6, "SSD-1TB", "1TB NVMe SSD", 11_000, 16_900, 12, 25, true, false),
    ] {
        catalog.upsert_product(p);
    }

    catalog.upsert_warehouse(Warehouse {
        id: WarehouseId(1),
        code: "WH1".to_string(),
        name: "Main Warehouse".to_string(),
        address: "123 Industrial Rd, New York, NY".to_string(),
    });
    catalog.upsert_warehouse(Warehouse {
        id: WarehouseId(2),
        code: "WH2".to_string(),
        name: "West Coast Hub".to_string(),
        address: "456 Pacific Ave, Los Angeles, CA".to_string(),
    });

    for (id, warehouse_id, code, zone) in [
        (1u32, 1u32, "A1", "A"),
        (2, 1, "A2", "A"),
        (3, 1, "B1", "B"),
        (4, 2, "C1", "C"),
        (5, 2, "C2", "C"),
    ] {
        catalog.add_bin(Bin {
            id: BinId(id),
            warehouse_id: WarehouseId(warehouse_id),
            code: code.to_string(),
            zone: zone.to_string(),
        })?;
    }

    Ok(())
}

fn contact(email: &str, phone: Option<&str>, address: Option<&str>) -> ContactInfo {
    ContactInfo {
        email: Some(email.to_string()),
        phone: phone.map(str::to_string),
        address: address.map(str::to_string),
    }
}

/// Three customers, three suppliers, three carriers.
pub fn seed_parties(directory: &PartyDirectory) {
    let parties = [
        Party {
            id: PartyId(1),
            name: "Acme Corp".to_string(),
            contact: contact("contact@acme.com", None, Some("123 Main St, NY")),
            role: PartyRole::Customer,
            status: PartyStatus::Active,
        },
        Party {
            id: PartyId(2),
            name: "Beta Systems".to_string(),
            contact: contact("info@betasys.com", None, Some("456 Tech Ave, CA")),
            role: PartyRole::Customer,
            status: PartyStatus::Active,
        },
        Party {
            id: PartyId(3),
            name: "Gamma Tech".to_string(),
            contact: contact("sales@gamma.tech", None, Some("789 Innovate Rd, TX")),
            role: PartyRole::Customer,
            status: PartyStatus::Active,
        },
        Party {
            id: PartyId(4),
            name: "TechParts Inc.".to_string(),
            contact: contact("purchase@techparts.com", Some("+1 555-0198"), None),
            role: PartyRole::Supplier {
                lead_time_days: 7,
                rating_tenths: 48,
            },
            status: PartyStatus::Active,
        },
        Party {
            id: PartyId(5),
            name: "Global Electronics".to_string(),
            contact: contact("orders@globalelec.com", Some("+1 555-0271"), None),
            role: PartyRole::Supplier {
                lead_time_days: 10,
                rating_tenths: 45,
            },
            status: PartyStatus::Active,
        },
        Party {
            id: PartyId(6),
            name: "Office Supplies Co.".to_string(),
            contact: contact("sales@officesupplies.co", Some("+1 555-0333"), None),
            role: PartyRole::Supplier {
                lead_time_days: 5,
                rating_tenths: 49,
            },
            status: PartyStatus::Inactive,
        },
        Party {
            id: PartyId(7),
            name: "FedEx".to_string(),
            contact: ContactInfo::default(),
            role: PartyRole::Carrier { flat_rate: 1_500 },
            status: PartyStatus::Active,
        },
        Party {
            id: PartyId(8),
            name: "UPS".to_string(),
            contact: ContactInfo::default(),
            role: PartyRole::Carrier { flat_rate: 1_200 },
            status: PartyStatus::Active,
        },
        Party {
            id: PartyId(9),
            name: "DHL".to_string(),
            contact: ContactInfo::default(),
            role: PartyRole::Carrier { flat_rate: 1_800 },
            status: PartyStatus::Active,
        },
    ];

    for party in parties {
        directory.upsert(party);
    }
}

/// The canonical ledger sequence: realistic receipt/issue layers per
/// location, ending with an issue that overdraws its bin. The seeding
/// path drops that last request, which is exactly the point — the demo
/// data shows the negative-stock guard doing its job.
pub fn canonical_movements() -> Vec<MovementRequest> {
    let receipt = |p: u32, w: u32, b: u32, qty: i64, cost: i64, grn: &str| {
        MovementRequest::new(p, w, b, TransactionType::RECEIPT, qty, cost)
            .with_reference(ReferenceType::GoodsReceipt, grn)
    };
    let issue = |p: u32, w: u32, b: u32, qty: i64, cost: i64, so: &str| {
        MovementRequest::new(p, w, b, TransactionType::ISSUE, qty, cost)
            .with_reference(ReferenceType::SalesOrder, so)
    };
    let expiry = |y: i32, m: u32, d: u32| NaiveDate::from_ymd_opt(y, m, d);

    vec![
        receipt(1, 1, 1, 25, 120_000, "101"),
        issue(1, 1, 1, 8, 120_000, "201"),
        receipt(1, 1, 2, 10, 118_000, "102"),
        issue(1, 1, 2, 3, 118_000, "202"),
        receipt(2, 1, 3, 60, 18_000, "103"),
        issue(2, 1, 3, 42, 18_000, "203"),
        receipt(3, 2, 4, 120, 8_500, "104"),
        issue(3, 2, 4, 85, 8_500, "204"),
        receipt(5, 1, 1, 40, 7_500, "105").with_batch("BATCH2025A", expiry(2025, 12, 31)),
        issue(5, 1, 1, 38, 7_500, "205").with_batch("BATCH2025A", None),
        receipt(6, 2, 5, 30, 11_000, "106").with_batch("BATCH2025B", expiry(2025, 11, 15)),
        issue(6, 2, 5, 5, 11_000, "206").with_batch("BATCH2025B", None),
        receipt(4, 1, 2, 20, 4_500, "107"),
        // Overdraws bin 2 by 5; dropped by the seeding path.
        issue(4, 1, 2, 25, 4_500, "207"),
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn snapshot(customer: &Party) -> CustomerSnapshot {
    CustomerSnapshot {
        customer_id: customer.id,
        name: customer.name.clone(),
        email: customer.contact.email.clone().unwrap_or_default(),
        address: customer.contact.address.clone().unwrap_or_default(),
    }
}

/// One flagship order plus eighteen patterned ones, every other order
/// shipped through a cycling carrier.
pub fn seed_demo_orders(
    desk: &SalesDesk,
    directory: &PartyDirectory,
    catalog: &Catalog,
) -> DomainResult<()> {
    let customers = directory.customers();
    let carriers = directory.carriers();
    let products = catalog.products();
    if customers.is_empty() || carriers.is_empty() || products.len() < 4 {
        return Err(stockbook_core::DomainError::validation(
            "demo orders need the seeded catalog and parties",
        ));
    }

    let line = |product: &Product, quantity: i64| NewOrderLine {
        product_id: product.id,
        product_name: product.name.clone(),
        quantity,
        unit_price: product.selling_price,
    };

    // Flagship order: Acme, confirmed, laptop + mice.
    desk.create_order(NewOrder {
        customer: snapshot(&customers[0]),
        order_date: date(2025, 3, 15),
        status: OrderStatus::Confirmed,
        lines: vec![line(&products[0], 2), line(&products[3], 5)],
    })?;

    let statuses = [
        OrderStatus::Draft,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];
    let ship_states = [
        ShippingStatus::Shipped,
        ShippingStatus::InTransit,
        ShippingStatus::Delivered,
    ];

    for i in 0..18usize {
        let customer = &customers[i % customers.len()];
        let mut lines = Vec::new();
        for j in 0..(1 + i % 3) {
            let product = &products[(i + 2 * j) % products.len()];
            lines.push(line(product, (1 + (i + j) % 10) as i64));
        }

        let order = desk.create_order(NewOrder {
            customer: snapshot(customer),
            order_date: date(2025, 1 + (i % 3) as u32, 1 + ((i * 3) % 28) as u32),
            status: statuses[i % statuses.len()],
            lines,
        })?;

        if i % 2 == 1 {
            let carrier = &carriers[i % carriers.len()];
            let shipment = desk.create_shipment(order.id, carrier)?;
            desk.update_shipment_status(shipment.id, ship_states[i % ship_states.len()])?;
        }
    }

    Ok(())
}
