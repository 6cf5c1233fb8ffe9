//! Exportable inventory report.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::movement::Movement;
use crate::product::{Product, total_stock_value};
use crate::views::{CategoryTotals, LowStockEntry, ProductValue, category_totals, low_stock_report, top_by_value};

/// How many products the report lists by value.
pub const REPORT_TOP_VALUE_LIMIT: usize = 10;

/// Point-in-time report of the whole inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    /// Day the report was generated, `dd/mm/yyyy`.
    pub date: String,
    pub generated_at: DateTime<Utc>,
    pub total_products: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    pub total_movements: usize,
    pub sales_by_category: Vec<CategoryTotals>,
    pub low_stock_products: Vec<LowStockEntry>,
    pub top_value_products: Vec<ProductValue>,
}

impl InventoryReport {
    pub fn build(products: &[Product], movements: &[Movement], now: DateTime<Utc>) -> Self {
        Self {
            date: now.format("%d/%m/%Y").to_string(),
            generated_at: now,
            total_products: products.len(),
            total_value: total_stock_value(products),
            total_movements: movements.len(),
            sales_by_category: category_totals(products),
            low_stock_products: low_stock_report(products),
            top_value_products: top_by_value(products, REPORT_TOP_VALUE_LIMIT),
        }
    }

    /// Download file name, e.g. `relatorio-estoque-2026-10-18.json`.
    pub fn file_name(&self) -> String {
        format!("relatorio-estoque-{}.json", self.generated_at.format("%Y-%m-%d"))
    }
}
