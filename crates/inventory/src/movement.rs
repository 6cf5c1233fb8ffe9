use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, MovementId, ProductId};

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Stock-in.
    Entrada,
    /// Stock-out.
    Saida,
}

/// Outcome of applying a movement to a stock quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StockChange {
    pub resulting_quantity: u64,
    /// True when a saida asked for more than was in stock and the result was
    /// floored at zero.
    pub clamped: bool,
}

impl MovementKind {
    pub fn label(&self) -> &'static str {
        match self {
            MovementKind::Entrada => "entrada",
            MovementKind::Saida => "saida",
        }
    }

    /// Apply `quantity` to `current` in this direction, never going below zero.
    pub fn apply(&self, current: u64, quantity: u64) -> StockChange {
        match self {
            MovementKind::Entrada => StockChange {
                resulting_quantity: current.saturating_add(quantity),
                clamped: false,
            },
            MovementKind::Saida => StockChange {
                resulting_quantity: current.saturating_sub(quantity),
                clamped: quantity > current,
            },
        }
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl core::str::FromStr for MovementKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entrada" | "in" => Ok(MovementKind::Entrada),
            "saida" | "saída" | "out" => Ok(MovementKind::Saida),
            other => Err(DomainError::validation(format!("unknown movement type: {other}"))),
        }
    }
}

/// A recorded stock movement. Never edited after it is recorded.
///
/// `quantity` is the amount that was requested, even when the product's stock
/// was clamped at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: MovementId,
    pub product_id: ProductId,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub quantity: u64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

impl Movement {
    pub fn from_fields(id: MovementId, fields: NewMovement, date: DateTime<Utc>) -> Self {
        Self {
            id,
            product_id: fields.product_id,
            kind: fields.kind,
            quantity: fields.quantity,
            date,
            notes: fields.notes,
        }
    }
}

impl Entity for Movement {
    type Id = MovementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Fields supplied by the caller when recording a movement. The date is
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovement {
    pub product_id: ProductId,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub quantity: u64,
    #[serde(default)]
    pub notes: String,
}

impl NewMovement {
    /// Movement-form rules; not enforced by the store.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity == 0 {
            return Err(DomainError::validation("quantity must be greater than zero"));
        }
        Ok(())
    }
}
