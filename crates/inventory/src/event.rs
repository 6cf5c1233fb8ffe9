use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::ProductId;
use stockroom_events::Event;

use crate::movement::Movement;
use crate::product::Product;

/// Event: ProductAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAdded {
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductUpdated. Carries the record after the merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdated {
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductDeleted, together with the movements removed by the cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDeleted {
    pub product: Product,
    pub removed_movements: Vec<Movement>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: MovementRecorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecorded {
    pub movement: Movement,
    /// Product quantity after the movement was applied.
    pub resulting_quantity: u64,
    pub clamped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ProductAdded(ProductAdded),
    ProductUpdated(ProductUpdated),
    ProductDeleted(ProductDeleted),
    MovementRecorded(MovementRecorded),
}

impl InventoryEvent {
    /// The product this event is about.
    pub fn product_id(&self) -> ProductId {
        match self {
            InventoryEvent::ProductAdded(e) => e.product.id,
            InventoryEvent::ProductUpdated(e) => e.product.id,
            InventoryEvent::ProductDeleted(e) => e.product.id,
            InventoryEvent::MovementRecorded(e) => e.movement.product_id,
        }
    }
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ProductAdded(_) => "inventory.product.added",
            InventoryEvent::ProductUpdated(_) => "inventory.product.updated",
            InventoryEvent::ProductDeleted(_) => "inventory.product.deleted",
            InventoryEvent::MovementRecorded(_) => "inventory.movement.recorded",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ProductAdded(e) => e.occurred_at,
            InventoryEvent::ProductUpdated(e) => e.occurred_at,
            InventoryEvent::ProductDeleted(e) => e.occurred_at,
            InventoryEvent::MovementRecorded(e) => e.movement.date,
        }
    }
}
