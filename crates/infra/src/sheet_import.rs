//! Spreadsheet import job.
//!
//! Reads a sheet's data range exported as a JSON 2-D array and maps each row
//! positionally onto a `SheetRecord`. Row 0 is the header. Independent of the
//! inventory store: records are returned to the caller, never applied.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Columns read from every row.
pub const SHEET_COLUMNS: usize = 32;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("sheet io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed sheet: {0}")]
    Malformed(String),

    #[error("sheet data range is empty")]
    EmptyRange,
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::Malformed(err.to_string())
    }
}

/// One spreadsheet row. Every field is text; empty cells are `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRecord {
    pub id: String,
    pub status: String,
    pub product_name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub variety: String,
    pub origin: String,
    pub roast_level: String,
    pub spice_level: String,
    pub quantity: String,
    pub unit: String,
    pub min_stock: String,
    pub max_stock: String,
    pub purchase_price: String,
    pub sale_price: String,
    pub profit_margin: String,
    pub supplier: String,
    pub supplier_contact: String,
    pub purchase_date: String,
    pub expiry_date: String,
    pub harvest_date: String,
    pub roast_date: String,
    pub warehouse: String,
    pub shelf: String,
    pub quality_grade: String,
    pub certifications: String,
    pub batch: String,
    pub invoice_number: String,
    pub notes: String,
    pub created_at: String,
    pub updated_at: String,
    pub created_by: String,
}

impl SheetRecord {
    /// Map a row by position. Short rows leave the trailing fields empty;
    /// cells past the last column are ignored.
    pub fn from_row(row: &[Value]) -> Self {
        let mut cells = (0..SHEET_COLUMNS).map(|i| row.get(i).map(cell_text).unwrap_or_default());
        let mut next = || cells.next().unwrap_or_default();
        Self {
            id: next(),
            status: next(),
            product_name: next(),
            category: next(),
            kind: next(),
            variety: next(),
            origin: next(),
            roast_level: next(),
            spice_level: next(),
            quantity: next(),
            unit: next(),
            min_stock: next(),
            max_stock: next(),
            purchase_price: next(),
            sale_price: next(),
            profit_margin: next(),
            supplier: next(),
            supplier_contact: next(),
            purchase_date: next(),
            expiry_date: next(),
            harvest_date: next(),
            roast_date: next(),
            warehouse: next(),
            shelf: next(),
            quality_grade: next(),
            certifications: next(),
            batch: next(),
            invoice_number: next(),
            notes: next(),
            created_at: next(),
            updated_at: next(),
            created_by: next(),
        }
    }
}

/// Cell text. Null, false, zero and empty cells read as `""`.
pub fn cell_text(cell: &Value) -> String {
    match cell {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 || f.is_nan() => String::new(),
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::Array(_) | Value::Object(_) => cell.to_string(),
    }
}

/// Records for every row after the header.
pub fn records_from_grid(grid: &[Vec<Value>]) -> Result<Vec<SheetRecord>, ImportError> {
    let (_header, rows) = grid.split_first().ok_or(ImportError::EmptyRange)?;
    Ok(rows.iter().map(|row| SheetRecord::from_row(row)).collect())
}

/// Read a grid file and map it. Any failure aborts the whole import.
pub fn import_sheet(path: &Path) -> Result<Vec<SheetRecord>, ImportError> {
    let bytes = fs::read(path)?;
    let grid: Vec<Vec<Value>> = serde_json::from_slice(&bytes)?;
    let records = records_from_grid(&grid)?;
    tracing::info!(path = %path.display(), records = records.len(), "sheet imported");
    Ok(records)
}
