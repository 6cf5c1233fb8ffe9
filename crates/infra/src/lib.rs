//! Infrastructure layer: the inventory store, snapshot slots, clock, report
//! files and the spreadsheet import job.

pub mod clock;
pub mod report;
pub mod sheet_import;
pub mod snapshot;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use report::{ReportError, write_report};
pub use sheet_import::{ImportError, SheetRecord, import_sheet};
pub use snapshot::{InMemorySnapshotStore, JsonFileSnapshotStore, SnapshotError, SnapshotStore};
pub use store::{InventoryStore, MovementReceipt, ProductRemoval};
