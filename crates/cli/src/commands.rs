//! Command handlers. Each prints its result as pretty JSON to `out`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, bail};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use stockroom_core::ProductId;
use stockroom_infra::{InventoryStore, SnapshotStore, import_sheet, write_report};
use stockroom_inventory::views::{
    CategoryTotals, DEFAULT_TURNOVER_LIMIT, LowStockEntry, MonthlyMovements, MovementLogEntry, MovementStats, Summary,
    TurnoverEntry, filter_catalog, low_stock_report, monthly_movements, movement_log, movement_stats,
    populated_categories, summarize, top_by_quantity, turnover,
};
use stockroom_inventory::{InventoryReport, NewMovement, NewProduct, Product, ProductPatch};

use crate::args::{Command, MovementsCommand, ProductsCommand};
use crate::config::Config;

/// Products shown in the dashboard's quantity ranking.
const DASHBOARD_TOP_QUANTITY: usize = 8;

/// A catalog row: the product plus its derived status and value.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogRow<'a> {
    #[serde(flatten)]
    product: &'a Product,
    status: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    stock_value: Decimal,
}

impl<'a> From<&'a Product> for CatalogRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            product,
            status: product.status().label(),
            stock_value: product.stock_value(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Dashboard<'a> {
    summary: Summary,
    year: i32,
    monthly: Vec<MonthlyMovements>,
    categories: Vec<CategoryTotals>,
    top_by_quantity: Vec<CatalogRow<'a>>,
    turnover: Vec<TurnoverEntry>,
    low_stock: Vec<LowStockEntry>,
}

#[derive(Debug, Serialize)]
struct MovementListing<'a> {
    stats: MovementStats,
    movements: Vec<MovementLogEntry<'a>>,
}

/// Run a command against an opened store.
pub fn run<S, W>(command: Command, store: &mut InventoryStore<S>, config: &Config, out: &mut W) -> anyhow::Result<()>
where
    S: SnapshotStore,
    W: Write,
{
    match command {
        Command::Products(cmd) => products(cmd, store, out),
        Command::Movements(cmd) => movements(cmd, store, out),
        Command::Dashboard { year } => dashboard(store, config, year, out),
        Command::Report { out: dir } => report(store, &dir, out),
        Command::ImportSheet { grid } => sheet(&grid, out),
    }
}

fn products<S: SnapshotStore, W: Write>(
    command: ProductsCommand,
    store: &mut InventoryStore<S>,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        ProductsCommand::List { category, search } => {
            let rows: Vec<CatalogRow<'_>> = filter_catalog(store.products(), &search, category)
                .into_iter()
                .map(CatalogRow::from)
                .collect();
            print_json(out, &rows)
        }
        ProductsCommand::Add {
            name,
            category,
            quantity,
            unit_price,
            min_stock,
        } => {
            let fields = NewProduct {
                name,
                category,
                quantity,
                unit_price,
                min_stock,
            };
            fields.validate().context("invalid product")?;
            let product = store.add_product(fields)?;
            ensure_saved(store)?;
            print_json(out, &CatalogRow::from(&product))
        }
        ProductsCommand::Update {
            id,
            name,
            category,
            quantity,
            unit_price,
            min_stock,
        } => {
            let patch = ProductPatch {
                name,
                category,
                quantity,
                unit_price,
                min_stock,
            };
            if patch.is_empty() {
                bail!("nothing to update; pass at least one field");
            }
            if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
                bail!("invalid product: name cannot be empty");
            }
            if patch.unit_price.is_some_and(|p| p.is_sign_negative()) {
                bail!("invalid product: unit price cannot be negative");
            }
            let product = store
                .update_product(&id, patch)
                .with_context(|| format!("product {id} not updated"))?;
            ensure_saved(store)?;
            print_json(out, &CatalogRow::from(&product))
        }
        ProductsCommand::Delete { id } => delete(store, &id, out),
    }
}

fn delete<S: SnapshotStore, W: Write>(
    store: &mut InventoryStore<S>,
    id: &ProductId,
    out: &mut W,
) -> anyhow::Result<()> {
    match store.delete_product(id) {
        Some(removal) => {
            ensure_saved(store)?;
            print_json(
                out,
                &serde_json::json!({
                    "deleted": removal.product,
                    "removedMovements": removal.removed_movements.len(),
                }),
            )
        }
        None => {
            tracing::info!(product_id = %id, "product not found; nothing deleted");
            print_json(out, &serde_json::json!({ "deleted": null, "removedMovements": 0 }))
        }
    }
}

fn movements<S: SnapshotStore, W: Write>(
    command: MovementsCommand,
    store: &mut InventoryStore<S>,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        MovementsCommand::Add {
            product,
            kind,
            quantity,
            notes,
        } => {
            let fields = NewMovement {
                product_id: product,
                kind,
                quantity,
                notes,
            };
            fields.validate().context("invalid movement")?;
            let receipt = store
                .add_movement(fields)
                .with_context(|| format!("product {product} not found"))?;
            ensure_saved(store)?;
            print_json(
                out,
                &serde_json::json!({
                    "movement": receipt.movement,
                    "resultingQuantity": receipt.resulting_quantity,
                    "clamped": receipt.clamped,
                }),
            )
        }
        MovementsCommand::List { kind, search } => {
            let listing = MovementListing {
                stats: movement_stats(store.movements(), store.now()),
                movements: movement_log(store.products(), store.movements(), kind, &search),
            };
            print_json(out, &listing)
        }
    }
}

fn dashboard<S: SnapshotStore, W: Write>(
    store: &InventoryStore<S>,
    config: &Config,
    year: Option<i32>,
    out: &mut W,
) -> anyhow::Result<()> {
    let now = store.now();
    let year = year.unwrap_or_else(|| now.year());
    let (products, movements) = (store.products(), store.movements());

    let dashboard = Dashboard {
        summary: summarize(products, movements, config.low_stock_policy, now),
        year,
        monthly: monthly_movements(movements, year),
        categories: populated_categories(products),
        top_by_quantity: top_by_quantity(products, DASHBOARD_TOP_QUANTITY)
            .into_iter()
            .map(CatalogRow::from)
            .collect(),
        turnover: turnover(products, movements, DEFAULT_TURNOVER_LIMIT),
        low_stock: low_stock_report(products),
    };
    print_json(out, &dashboard)
}

fn report<S: SnapshotStore, W: Write>(store: &InventoryStore<S>, dir: &Path, out: &mut W) -> anyhow::Result<()> {
    let report = InventoryReport::build(store.products(), store.movements(), store.now());
    let path = write_report(dir, &report).with_context(|| format!("failed to write report into {}", dir.display()))?;
    print_json(out, &serde_json::json!({ "path": path }))
}

/// Independent of the store; runs without opening a slot.
pub fn sheet<W: Write>(grid: &Path, out: &mut W) -> anyhow::Result<()> {
    let records = import_sheet(grid).with_context(|| format!("failed to import {}", grid.display()))?;
    print_json(out, &records)
}

fn ensure_saved<S: SnapshotStore>(store: &InventoryStore<S>) -> anyhow::Result<()> {
    if let Some(err) = store.last_save_error() {
        bail!("change applied but not saved: {err}");
    }
    Ok(())
}

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use stockroom_infra::{FixedClock, InMemorySnapshotStore};
    use stockroom_inventory::{Category, LowStockPolicy, default_catalog};
    use tempfile::TempDir;

    fn setup() -> (InventoryStore<InMemorySnapshotStore>, Config) {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let store = InventoryStore::with_state(
            default_catalog(now),
            InMemorySnapshotStore::new(),
            Arc::new(FixedClock::new(now)),
        );
        let config = Config {
            data_dir: "unused".into(),
            slot: "inventory-store".to_string(),
            low_stock_policy: LowStockPolicy::BelowMinimum,
        };
        (store, config)
    }

    fn run_json(
        command: Command,
        store: &mut InventoryStore<InMemorySnapshotStore>,
        config: &Config,
    ) -> serde_json::Value {
        let mut out = Vec::new();
        run(command, store, config, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn list_filters_by_category_and_shows_status() {
        let (mut store, config) = setup();

        let json = run_json(
            Command::Products(ProductsCommand::List {
                category: Some(Category::Cafe),
                search: String::new(),
            }),
            &mut store,
            &config,
        );

        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r["category"] == "Café"));
        assert!(rows.iter().all(|r| r["status"] == "Em Estoque"));
    }

    #[test]
    fn add_rejects_blank_name_before_touching_store() {
        let (mut store, config) = setup();
        let before = store.products().len();

        let result = run(
            Command::Products(ProductsCommand::Add {
                name: " ".to_string(),
                category: Category::Outros,
                quantity: 1,
                unit_price: Decimal::ONE,
                min_stock: 0,
            }),
            &mut store,
            &config,
            &mut Vec::new(),
        );

        assert!(result.is_err());
        assert_eq!(store.products().len(), before);
    }

    #[test]
    fn movement_add_reports_clamp() {
        let (mut store, config) = setup();
        let id = store.products()[0].id;
        let quantity = store.products()[0].quantity;

        let json = run_json(
            Command::Movements(MovementsCommand::Add {
                product: id,
                kind: stockroom_inventory::MovementKind::Saida,
                quantity: quantity + 10,
                notes: String::new(),
            }),
            &mut store,
            &config,
        );

        assert_eq!(json["resultingQuantity"], 0);
        assert_eq!(json["clamped"], true);
    }

    #[test]
    fn movement_for_unknown_product_fails() {
        let (mut store, config) = setup();

        let result = run(
            Command::Movements(MovementsCommand::Add {
                product: ProductId::new(),
                kind: stockroom_inventory::MovementKind::Entrada,
                quantity: 5,
                notes: String::new(),
            }),
            &mut store,
            &config,
            &mut Vec::new(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn delete_twice_reports_nothing_the_second_time() {
        let (mut store, config) = setup();
        let id = store.products()[0].id;

        let first = run_json(Command::Products(ProductsCommand::Delete { id }), &mut store, &config);
        let second = run_json(Command::Products(ProductsCommand::Delete { id }), &mut store, &config);

        assert_eq!(first["removedMovements"], 1);
        assert!(second["deleted"].is_null());
    }

    #[test]
    fn dashboard_has_twelve_months_and_stocked_categories() {
        let (mut store, config) = setup();

        let json = run_json(Command::Dashboard { year: None }, &mut store, &config);

        assert_eq!(json["year"], 2026);
        assert_eq!(json["monthly"].as_array().unwrap().len(), 12);
        let categories = json["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 3);
        assert!(categories.iter().all(|c| c["category"] != "Outros"));
        assert_eq!(json["topByQuantity"].as_array().unwrap().len(), 6);
        assert_eq!(json["summary"]["totalProducts"], 6);
    }

    #[test]
    fn report_writes_file_into_out_dir() {
        let (mut store, config) = setup();
        let dir = TempDir::new().unwrap();

        let json = run_json(
            Command::Report {
                out: dir.path().to_path_buf(),
            },
            &mut store,
            &config,
        );

        let path = std::path::PathBuf::from(json["path"].as_str().unwrap());
        assert!(path.ends_with("relatorio-estoque-2026-10-18.json"));
        assert!(path.exists());
    }

    #[test]
    fn dashboard_drops_category_emptied_by_saidas() {
        let (mut store, config) = setup();
        let pimentas: Vec<(ProductId, u64)> = store
            .get_products_by_category(Category::Pimenta)
            .iter()
            .map(|p| (p.id, p.quantity))
            .collect();
        for (id, quantity) in pimentas {
            run_json(
                Command::Movements(MovementsCommand::Add {
                    product: id,
                    kind: stockroom_inventory::MovementKind::Saida,
                    quantity,
                    notes: String::new(),
                }),
                &mut store,
                &config,
            );
        }

        let json = run_json(Command::Dashboard { year: None }, &mut store, &config);

        let categories: Vec<&str> = json["categories"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["category"].as_str().unwrap())
            .collect();
        assert_eq!(categories, vec!["Café", "Cacau"]);
    }

    #[test]
    fn dashboard_ranks_up_to_eight_products_by_quantity() {
        let (mut store, config) = setup();
        for i in 0..4 {
            run_json(
                Command::Products(ProductsCommand::Add {
                    name: format!("Blend {i}"),
                    category: Category::Outros,
                    quantity: 1_000 + i,
                    unit_price: Decimal::ONE,
                    min_stock: 0,
                }),
                &mut store,
                &config,
            );
        }

        let json = run_json(Command::Dashboard { year: None }, &mut store, &config);

        let top = json["topByQuantity"].as_array().unwrap();
        assert_eq!(top.len(), 8);
        assert_eq!(top[0]["name"], "Blend 3");
    }
}
