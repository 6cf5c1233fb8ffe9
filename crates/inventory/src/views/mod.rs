//! Derived views over products and movements.
//!
//! Every function here is pure: it reads the collections and returns a fresh
//! value. Callers recompute after each change instead of caching.

pub mod category;
pub mod log;
pub mod low_stock;
pub mod monthly;
pub mod ranking;
pub mod summary;

pub use category::{CategoryTotals, category_totals, populated_categories};
pub use log::{MovementLogEntry, MovementStats, UNKNOWN_PRODUCT_NAME, filter_catalog, movement_log, movement_stats};
pub use low_stock::{LowStockEntry, LowStockPolicy, low_stock_report};
pub use monthly::{MONTH_LABELS, MonthlyMovements, monthly_movements};
pub use ranking::{DEFAULT_TURNOVER_LIMIT, ProductValue, TurnoverEntry, top_by_quantity, top_by_value, turnover};
pub use summary::{Summary, summarize};
