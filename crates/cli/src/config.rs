//! Runtime configuration resolved from flags and environment.

use std::path::PathBuf;

use stockroom_infra::snapshot::DEFAULT_SLOT;
use stockroom_inventory::LowStockPolicy;

use crate::args::GlobalArgs;

/// Used when no platform data directory can be found.
const FALLBACK_DATA_DIR: &str = ".stockroom";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub slot: String,
    pub low_stock_policy: LowStockPolicy,
}

impl Config {
    pub fn from_args(args: &GlobalArgs) -> Self {
        let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);
        let slot = args
            .slot
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SLOT)
            .to_string();
        let low_stock_policy = args
            .low_stock_threshold
            .map(LowStockPolicy::BelowFixed)
            .unwrap_or_default();

        Self {
            data_dir,
            slot,
            low_stock_policy,
        }
    }
}

/// `{app_data_dir}/stockroom`, or `./.stockroom` when the OS offers none.
pub fn default_data_dir() -> PathBuf {
    let base = dirs::data_dir().or_else(|| {
        dirs::home_dir().map(|mut h| {
            h.push(".local");
            h.push("share");
            h
        })
    });
    match base {
        Some(mut dir) => {
            dir.push("stockroom");
            dir
        }
        None => {
            tracing::warn!("no OS data directory; using {FALLBACK_DATA_DIR}");
            PathBuf::from(FALLBACK_DATA_DIR)
        }
    }
}
