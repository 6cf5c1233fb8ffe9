use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::movement::Movement;
use crate::product::{Product, total_stock_value};
use crate::views::low_stock::LowStockPolicy;

/// Dashboard headline figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_products: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    pub total_movements: usize,
    pub low_stock_count: usize,
    pub low_stock_policy: LowStockPolicy,
    pub movements_this_month: usize,
    pub movements_last_month: usize,
    /// Percentage change from last month to this month; zero when last month
    /// had no movements.
    pub movement_change_pct: f64,
}

pub fn summarize(
    products: &[Product],
    movements: &[Movement],
    policy: LowStockPolicy,
    now: DateTime<Utc>,
) -> Summary {
    let (year, month) = (now.year(), now.month());
    let (last_year, last_month) = if month == 1 { (year - 1, 12) } else { (year, month - 1) };

    let in_month = |y: i32, m: u32| {
        movements
            .iter()
            .filter(|mv| mv.date.year() == y && mv.date.month() == m)
            .count()
    };
    let movements_this_month = in_month(year, month);
    let movements_last_month = in_month(last_year, last_month);

    let movement_change_pct = if movements_last_month > 0 {
        (movements_this_month as f64 - movements_last_month as f64) / movements_last_month as f64
            * 100.0
    } else {
        0.0
    };

    Summary {
        total_products: products.len(),
        total_value: total_stock_value(products),
        total_movements: movements.len(),
        low_stock_count: products.iter().filter(|p| policy.is_low(p)).count(),
        low_stock_policy: policy,
        movements_this_month,
        movements_last_month,
        movement_change_pct,
    }
}
