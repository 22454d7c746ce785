use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use stockbook_catalog::{BinId, ProductId, WarehouseId};
use stockbook_ledger::{MovementRequest, StockLedger, TransactionType};

fn seeded_ledger(entries: usize) -> StockLedger {
    let ledger = StockLedger::permissive();
    for i in 0..entries {
        let product = (i % 8) as u32 + 1;
        let bin = (i % 4) as u32 + 1;
        // Alternate receipts and small issues so balances stay positive.
        let request = if i % 3 == 0 {
            MovementRequest::new(product, 1u32, bin, TransactionType::ISSUE, 1, 100)
        } else {
            MovementRequest::new(product, 1u32, bin, TransactionType::RECEIPT, 5, 100)
        };
        let _ = ledger.append(request);
    }
    ledger
}

/// Append cost grows with history length (full-history balance check).
fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    for size in [100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let ledger = seeded_ledger(size);
            b.iter(|| {
                let stored = ledger
                    .append(MovementRequest::new(
                        1u32,
                        1u32,
                        1u32,
                        TransactionType::RECEIPT,
                        black_box(5),
                        100,
                    ))
                    .unwrap();
                black_box(stored.balance_after)
            });
        });
    }
    group.finish();
}

fn bench_current_balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("current_balance");
    for size in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let ledger = seeded_ledger(size);
            b.iter(|| {
                black_box(ledger.current_balance(
                    ProductId(1),
                    WarehouseId(1),
                    BinId(1),
                ))
            });
        });
    }
    group.finish();
}

fn bench_stock_summary(c: &mut Criterion) {
    let ledger = seeded_ledger(10_000);
    c.bench_function("stock_summary_10k", |b| {
        b.iter(|| black_box(ledger.stock_summary()))
    });
}

criterion_group!(benches, bench_append, bench_current_balance, bench_stock_summary);
criterion_main!(benches);
