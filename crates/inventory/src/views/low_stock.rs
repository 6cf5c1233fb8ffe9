use serde::{Deserialize, Serialize};

use stockroom_core::ProductId;

use crate::product::Product;

/// Which threshold decides that a product is running low.
///
/// `BelowMinimum` compares against each product's own `min_stock` and agrees
/// with [`crate::StockStatus`]. `BelowFixed` applies one threshold to every
/// product regardless of its minimum.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LowStockPolicy {
    #[default]
    BelowMinimum,
    BelowFixed(u64),
}

impl LowStockPolicy {
    pub fn is_low(&self, product: &Product) -> bool {
        match self {
            LowStockPolicy::BelowMinimum => product.quantity < product.min_stock,
            LowStockPolicy::BelowFixed(threshold) => product.quantity < *threshold,
        }
    }
}

/// A product below its minimum stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockEntry {
    pub product_id: ProductId,
    pub name: String,
    pub current: u64,
    pub minimum: u64,
    /// minimum − current.
    pub deficit: u64,
}

/// Products with quantity below `min_stock`, emptiest first.
pub fn low_stock_report(products: &[Product]) -> Vec<LowStockEntry> {
    let mut entries: Vec<LowStockEntry> = products
        .iter()
        .filter(|p| p.is_below_minimum())
        .map(|p| LowStockEntry {
            product_id: p.id,
            name: p.name.clone(),
            current: p.quantity,
            minimum: p.min_stock,
            deficit: p.min_stock - p.quantity,
        })
        .collect();
    entries.sort_by_key(|e| e.current);
    entries
}
