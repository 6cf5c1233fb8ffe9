//! Inventory domain: products, stock movements and the views derived from them.
//!
//! Business rules only: no IO, no clock, no persistence. Ids and timestamps
//! arrive inside commands so every transition is deterministic.

pub mod event;
pub mod movement;
pub mod product;
pub mod report;
pub mod seed;
pub mod state;
pub mod views;

pub use event::{InventoryEvent, MovementRecorded, ProductAdded, ProductDeleted, ProductUpdated};
pub use movement::{Movement, MovementKind, NewMovement, StockChange};
pub use product::{Category, NewProduct, Product, ProductPatch, StockStatus, total_stock_value};
pub use report::InventoryReport;
pub use seed::default_catalog;
pub use state::{AddProduct, DeleteProduct, InventoryCommand, InventoryState, RecordMovement, UpdateProduct};
pub use views::LowStockPolicy;
