use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::movement::{Movement, MovementKind};
use crate::product::{Category, Product};

/// Name shown for movements whose product can no longer be resolved.
pub const UNKNOWN_PRODUCT_NAME: &str = "Produto desconhecido";

/// Catalog screen filter: case-insensitive name search plus optional category.
pub fn filter_catalog<'a>(
    products: &'a [Product],
    search: &str,
    category: Option<Category>,
) -> Vec<&'a Product> {
    let needle = search.to_lowercase();
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .filter(|p| category.is_none_or(|c| p.category == c))
        .collect()
}

/// A movement joined with its product's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementLogEntry<'a> {
    pub movement: &'a Movement,
    pub product_name: &'a str,
}

/// Movement log, newest first, optionally narrowed by kind and by a
/// case-insensitive search on the product name.
pub fn movement_log<'a>(
    products: &'a [Product],
    movements: &'a [Movement],
    kind: Option<MovementKind>,
    search: &str,
) -> Vec<MovementLogEntry<'a>> {
    let needle = search.to_lowercase();
    let mut entries: Vec<MovementLogEntry<'a>> = movements
        .iter()
        .filter(|m| kind.is_none_or(|k| m.kind == k))
        .map(|m| MovementLogEntry {
            movement: m,
            product_name: products
                .iter()
                .find(|p| p.id == m.product_id)
                .map(|p| p.name.as_str())
                .unwrap_or(UNKNOWN_PRODUCT_NAME),
        })
        .filter(|e| e.product_name.to_lowercase().contains(&needle))
        .collect();
    entries.sort_by(|a, b| b.movement.date.cmp(&a.movement.date));
    entries
}

/// Counters shown above the movement log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MovementStats {
    pub total: usize,
    pub entradas: usize,
    pub saidas: usize,
    /// Movements dated on the same UTC day as `now`.
    pub today: usize,
}

pub fn movement_stats(movements: &[Movement], now: DateTime<Utc>) -> MovementStats {
    let today = now.date_naive();
    MovementStats {
        total: movements.len(),
        entradas: movements.iter().filter(|m| m.kind == MovementKind::Entrada).count(),
        saidas: movements.iter().filter(|m| m.kind == MovementKind::Saida).count(),
        today: movements.iter().filter(|m| m.date.date_naive() == today).count(),
    }
}
