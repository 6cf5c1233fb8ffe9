//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use stockroom_core::ProductId;
use stockroom_inventory::{Category, MovementKind};
use stockroom_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "stockroom", version, about = "Inventory of coffee, pepper and cacao products")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Directory holding the snapshot slot file.
    #[arg(long, global = true, env = "STOCKROOM_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Slot name; the snapshot lives in `<data-dir>/<slot>.json`.
    #[arg(long, global = true, env = "STOCKROOM_SLOT")]
    pub slot: Option<String>,

    /// Count products below this fixed quantity as low stock on the
    /// dashboard instead of comparing against each product's minimum.
    #[arg(long, global = true, env = "STOCKROOM_LOW_STOCK_THRESHOLD")]
    pub low_stock_threshold: Option<u64>,

    #[arg(long, global = true, env = "STOCKROOM_LOG_FORMAT", default_value = "json")]
    pub log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Catalog operations.
    #[command(subcommand)]
    Products(ProductsCommand),

    /// Stock movements.
    #[command(subcommand)]
    Movements(MovementsCommand),

    /// Headline figures, monthly flow, categories and rankings.
    Dashboard {
        /// Year for the monthly chart; defaults to the current year.
        #[arg(long)]
        year: Option<i32>,
    },

    /// Write the inventory report JSON file.
    Report {
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Read a spreadsheet grid export and print its records.
    ImportSheet { grid: PathBuf },
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    List {
        #[arg(long)]
        category: Option<Category>,
        #[arg(long, default_value = "")]
        search: String,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: Category,
        #[arg(long, default_value_t = 0)]
        quantity: u64,
        #[arg(long)]
        unit_price: Decimal,
        #[arg(long, default_value_t = 0)]
        min_stock: u64,
    },
    Update {
        id: ProductId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        quantity: Option<u64>,
        #[arg(long)]
        unit_price: Option<Decimal>,
        #[arg(long)]
        min_stock: Option<u64>,
    },
    Delete {
        id: ProductId,
    },
}

#[derive(Debug, Subcommand)]
pub enum MovementsCommand {
    Add {
        #[arg(long)]
        product: ProductId,
        #[arg(long)]
        kind: MovementKind,
        #[arg(long)]
        quantity: u64,
        #[arg(long, default_value = "")]
        notes: String,
    },
    List {
        #[arg(long)]
        kind: Option<MovementKind>,
        #[arg(long, default_value = "")]
        search: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_movement_add() {
        let id = ProductId::new();
        let cli = Cli::try_parse_from([
            "stockroom",
            "movements",
            "add",
            "--product",
            &id.to_string(),
            "--kind",
            "saida",
            "--quantity",
            "30",
        ])
        .unwrap();

        match cli.command {
            Command::Movements(MovementsCommand::Add {
                product,
                kind,
                quantity,
                notes,
            }) => {
                assert_eq!(product, id);
                assert_eq!(kind, MovementKind::Saida);
                assert_eq!(quantity, 30);
                assert_eq!(notes, "");
            }
            other => panic!("Expected movements add, got {other:?}"),
        }
    }

    #[test]
    fn parses_product_add_with_accented_category() {
        let cli = Cli::try_parse_from([
            "stockroom",
            "products",
            "add",
            "--name",
            "Café Robusta",
            "--category",
            "Café",
            "--quantity",
            "200",
            "--unit-price",
            "18.90",
        ])
        .unwrap();

        match cli.command {
            Command::Products(ProductsCommand::Add {
                category,
                unit_price,
                min_stock,
                ..
            }) => {
                assert_eq!(category, Category::Cafe);
                assert_eq!(unit_price, Decimal::new(1890, 2));
                assert_eq!(min_stock, 0);
            }
            other => panic!("Expected products add, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_category() {
        let result = Cli::try_parse_from(["stockroom", "products", "list", "--category", "chá"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["stockroom", "dashboard", "--slot", "loja-b", "--year", "2025"]).unwrap();

        assert_eq!(cli.global.slot.as_deref(), Some("loja-b"));
        assert!(matches!(cli.command, Command::Dashboard { year: Some(2025) }));
    }
}
