//! CSV export strings: a header row plus one comma-joined row per record.

use stockbook_ledger::{StockMovement, StockSummaryRow, ValuationRow};

/// Quote a field if it contains a comma, quote, or newline.
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn join(cells: &[String]) -> String {
    cells.join(",")
}

pub fn stock_summary_csv(rows: &[StockSummaryRow]) -> String {
    let mut out = vec!["product_id,warehouse_id,bin_id,on_hand".to_string()];
    for row in rows {
        out.push(join(&[
            row.key.product_id.to_string(),
            row.key.warehouse_id.to_string(),
            row.key.bin_id.to_string(),
            row.on_hand.to_string(),
        ]));
    }
    out.join("\n")
}

pub fn valuation_csv(rows: &[ValuationRow]) -> String {
    let mut out = vec!["product_id,sku,name,on_hand,value,average_cost".to_string()];
    for row in rows {
        out.push(join(&[
            row.product_id.to_string(),
            field(&row.sku),
            field(&row.name),
            row.on_hand.to_string(),
            row.value.to_string(),
            row.average_cost.to_string(),
        ]));
    }
    out.join("\n")
}

pub fn ledger_csv(entries: &[StockMovement]) -> String {
    let mut out = vec![
        "id,product_id,warehouse_id,bin_id,type,qty_in,qty_out,balance,unit_cost,reference,batch,created_at"
            .to_string(),
    ];
    for movement in entries {
        out.push(join(&[
            movement.id.to_string(),
            movement.product_id.to_string(),
            movement.warehouse_id.to_string(),
            movement.bin_id.to_string(),
            movement.transaction_type.label().to_string(),
            movement.quantity_in.to_string(),
            movement.quantity_out.to_string(),
            movement.balance_after.to_string(),
            movement.unit_cost.to_string(),
            movement
                .reference
                .as_ref()
                .map(|r| field(&r.to_string()))
                .unwrap_or_default(),
            movement
                .batch_number
                .as_deref()
                .map(field)
                .unwrap_or_default(),
            movement.created_at.to_rfc3339(),
        ]));
    }
    out.join("\n")
}
