use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use stockroom_core::ProductId;

use crate::movement::Movement;
use crate::product::Product;

/// How many products the turnover ranking shows by default.
pub const DEFAULT_TURNOVER_LIMIT: usize = 8;

/// A product and its stock value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductValue {
    pub product_id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

/// How actively a product circulates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnoverEntry {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u64,
    /// Sum of every movement quantity for the product, both directions.
    pub moved: u64,
    /// moved / (quantity + moved) × 100; zero when nothing moved.
    pub turnover_pct: f64,
}

/// The `n` products with the most units in stock, largest first.
pub fn top_by_quantity(products: &[Product], n: usize) -> Vec<&Product> {
    let mut ranked: Vec<&Product> = products.iter().collect();
    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    ranked.truncate(n);
    ranked
}

/// The `n` products with the highest stock value, largest first.
pub fn top_by_value(products: &[Product], n: usize) -> Vec<ProductValue> {
    let mut ranked: Vec<ProductValue> = products
        .iter()
        .map(|p| ProductValue {
            product_id: p.id,
            name: p.name.clone(),
            value: p.stock_value(),
        })
        .collect();
    ranked.sort_by(|a, b| b.value.cmp(&a.value));
    ranked.truncate(n);
    ranked
}

/// Products ranked by turnover, highest first, limited to `n`.
pub fn turnover(products: &[Product], movements: &[Movement], n: usize) -> Vec<TurnoverEntry> {
    let mut moved_by_product: HashMap<ProductId, u64> = HashMap::new();
    for movement in movements {
        let moved = moved_by_product.entry(movement.product_id).or_default();
        *moved = moved.saturating_add(movement.quantity);
    }

    let mut ranked: Vec<TurnoverEntry> = products
        .iter()
        .map(|p| {
            let moved = moved_by_product.get(&p.id).copied().unwrap_or(0);
            TurnoverEntry {
                product_id: p.id,
                name: p.name.clone(),
                quantity: p.quantity,
                moved,
                turnover_pct: turnover_pct(p.quantity, moved),
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.turnover_pct.total_cmp(&a.turnover_pct));
    ranked.truncate(n);
    ranked
}

fn turnover_pct(quantity: u64, moved: u64) -> f64 {
    if moved == 0 {
        return 0.0;
    }
    moved as f64 / (quantity as f64 + moved as f64) * 100.0
}
