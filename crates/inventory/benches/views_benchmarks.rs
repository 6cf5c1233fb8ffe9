use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use stockroom_core::{MovementId, ProductId};
use stockroom_inventory::views::{category_totals, monthly_movements, summarize, turnover};
use stockroom_inventory::{
    AddProduct, Category, InventoryCommand, InventoryState, LowStockPolicy, MovementKind, NewMovement,
    NewProduct, RecordMovement,
};

/// Build a store with `products` products and `movements_per_product` movements
/// each, spread over the last year.
fn populated_state(products: usize, movements_per_product: usize) -> InventoryState {
    let mut state = InventoryState::new();
    let now = Utc::now();

    for i in 0..products {
        let product_id = ProductId::new();
        state
            .execute(&InventoryCommand::AddProduct(AddProduct {
                product_id,
                fields: NewProduct {
                    name: format!("Produto {i}"),
                    category: Category::ALL[i % Category::ALL.len()],
                    quantity: 100,
                    unit_price: Decimal::new(1000 + i as i64, 2),
                    min_stock: 10,
                },
                occurred_at: now,
            }))
            .unwrap();

        for j in 0..movements_per_product {
            let kind = if j % 3 == 0 { MovementKind::Saida } else { MovementKind::Entrada };
            state
                .execute(&InventoryCommand::RecordMovement(RecordMovement {
                    movement_id: MovementId::new(),
                    fields: NewMovement {
                        product_id,
                        kind,
                        quantity: (j % 20 + 1) as u64,
                        notes: String::new(),
                    },
                    occurred_at: now - Duration::days((j % 365) as i64),
                }))
                .unwrap();
        }
    }

    state
}

fn bench_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("derived_views");

    for &(products, per_product) in &[(10usize, 10usize), (100, 50), (500, 100)] {
        let state = populated_state(products, per_product);
        let label = format!("{products}x{per_product}");
        let now = Utc::now();
        let year = chrono::Datelike::year(&now);

        group.bench_with_input(BenchmarkId::new("summary", &label), &state, |b, s| {
            b.iter(|| summarize(black_box(s.products()), black_box(s.movements()), LowStockPolicy::BelowMinimum, now))
        });
        group.bench_with_input(BenchmarkId::new("monthly", &label), &state, |b, s| {
            b.iter(|| monthly_movements(black_box(s.movements()), year))
        });
        group.bench_with_input(BenchmarkId::new("category", &label), &state, |b, s| {
            b.iter(|| category_totals(black_box(s.products())))
        });
        group.bench_with_input(BenchmarkId::new("turnover", &label), &state, |b, s| {
            b.iter(|| turnover(black_box(s.products()), black_box(s.movements()), 8))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_views);
criterion_main!(benches);
