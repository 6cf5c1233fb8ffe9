//! The inventory store: authoritative in-memory state plus persistence and
//! change notification.
//!
//! ## Mutation flow
//!
//! ```text
//! operation (add_product, add_movement, ...)
//!   ↓
//! 1. Build a command (fresh id, clock time)
//!   ↓
//! 2. InventoryState::handle → events (pure; errors leave state untouched)
//!   ↓
//! 3. InventoryState::apply (one event = one complete transition)
//!   ↓
//! 4. Save the full snapshot into the slot
//!   ↓
//! 5. Publish each event to subscribers
//! ```
//!
//! A failed save is logged and remembered (`last_save_error`) but does not
//! roll back the in-memory transition. Operations that change nothing
//! (deleting an unknown product) neither save nor publish.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use stockroom_core::{DomainError, DomainResult, MovementId, ProductId};
use stockroom_events::{Event, EventBus, InMemoryEventBus, Subscription};
use stockroom_inventory::{
    AddProduct, Category, DeleteProduct, InventoryCommand, InventoryEvent, InventoryState, Movement,
    NewMovement, NewProduct, Product, ProductPatch, RecordMovement, UpdateProduct, default_catalog,
};

use crate::clock::Clock;
use crate::snapshot::{SnapshotError, SnapshotStore};

/// What `delete_product` removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRemoval {
    pub product: Product,
    pub removed_movements: Vec<Movement>,
}

/// What `add_movement` recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementReceipt {
    pub movement: Movement,
    /// Product quantity after the movement.
    pub resulting_quantity: u64,
    /// The saida exceeded the stock and the quantity was floored at zero.
    pub clamped: bool,
}

/// Explicitly constructed state container; pass it by reference to consumers.
pub struct InventoryStore<S>
where
    S: SnapshotStore,
{
    state: InventoryState,
    snapshots: S,
    bus: InMemoryEventBus<InventoryEvent>,
    clock: Arc<dyn Clock>,
    last_save_error: Option<SnapshotError>,
}

impl<S> core::fmt::Debug for InventoryStore<S>
where
    S: SnapshotStore,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryStore")
            .field("products", &self.state.products().len())
            .field("movements", &self.state.movements().len())
            .field("last_save_error", &self.last_save_error)
            .finish()
    }
}

impl<S> InventoryStore<S>
where
    S: SnapshotStore,
{
    /// Load the saved snapshot, or start from the default catalog when the
    /// slot is empty. An unreadable or inconsistent slot is an error.
    pub fn open(snapshots: S, clock: Arc<dyn Clock>) -> Result<Self, SnapshotError> {
        let state = match snapshots.load()? {
            Some(state) => {
                tracing::info!(
                    products = state.products().len(),
                    movements = state.movements().len(),
                    "loaded inventory snapshot"
                );
                state
            }
            None => {
                tracing::info!("no saved inventory snapshot; starting from default catalog");
                default_catalog(clock.now())
            }
        };
        Ok(Self::with_state(state, snapshots, clock))
    }

    /// Start from an explicit state, ignoring whatever the slot holds.
    pub fn with_state(state: InventoryState, snapshots: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            state,
            snapshots,
            bus: InMemoryEventBus::new(),
            clock,
            last_save_error: None,
        }
    }

    /// Append a product. Fields are taken as given; see `NewProduct::validate`.
    pub fn add_product(&mut self, fields: NewProduct) -> DomainResult<Product> {
        let command = InventoryCommand::AddProduct(AddProduct {
            product_id: ProductId::new(),
            fields,
            occurred_at: self.clock.now(),
        });
        match self.commit(&command)?.into_iter().next() {
            Some(InventoryEvent::ProductAdded(e)) => Ok(e.product),
            _ => Err(DomainError::invariant("add_product produced no ProductAdded event")),
        }
    }

    /// Merge `patch` into the product. Unknown id: `NotFound`, nothing changes.
    pub fn update_product(&mut self, id: &ProductId, patch: ProductPatch) -> DomainResult<Product> {
        let command = InventoryCommand::UpdateProduct(UpdateProduct {
            product_id: *id,
            patch,
            occurred_at: self.clock.now(),
        });
        match self.commit(&command)?.into_iter().next() {
            Some(InventoryEvent::ProductUpdated(e)) => Ok(e.product),
            _ => Err(DomainError::invariant("update_product produced no ProductUpdated event")),
        }
    }

    /// Remove the product and all of its movements. Unknown id: `None`.
    pub fn delete_product(&mut self, id: &ProductId) -> Option<ProductRemoval> {
        let command = InventoryCommand::DeleteProduct(DeleteProduct {
            product_id: *id,
            occurred_at: self.clock.now(),
        });
        match self.commit(&command) {
            Ok(events) => events.into_iter().find_map(|event| match event {
                InventoryEvent::ProductDeleted(e) => Some(ProductRemoval {
                    product: e.product,
                    removed_movements: e.removed_movements,
                }),
                _ => None,
            }),
            Err(err) => {
                tracing::error!(product_id = %id, error = %err, "delete_product rejected");
                None
            }
        }
    }

    /// Record a movement and adjust the product's stock, clamping at zero.
    /// Unknown product: `NotFound`, nothing recorded.
    pub fn add_movement(&mut self, fields: NewMovement) -> DomainResult<MovementReceipt> {
        let command = InventoryCommand::RecordMovement(RecordMovement {
            movement_id: MovementId::new(),
            fields,
            occurred_at: self.clock.now(),
        });
        match self.commit(&command)?.into_iter().next() {
            Some(InventoryEvent::MovementRecorded(e)) => {
                if e.clamped {
                    tracing::warn!(
                        product_id = %e.movement.product_id,
                        requested = e.movement.quantity,
                        "saida exceeded stock; quantity clamped to zero"
                    );
                }
                Ok(MovementReceipt {
                    movement: e.movement,
                    resulting_quantity: e.resulting_quantity,
                    clamped: e.clamped,
                })
            }
            _ => Err(DomainError::invariant("add_movement produced no MovementRecorded event")),
        }
    }

    pub fn get_product_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.state.product(id)
    }

    pub fn get_products_by_category(&self, category: Category) -> Vec<&Product> {
        self.state.products_in(category)
    }

    pub fn products(&self) -> &[Product] {
        self.state.products()
    }

    pub fn movements(&self) -> &[Movement] {
        self.state.movements()
    }

    pub fn state(&self) -> &InventoryState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> InventoryState {
        self.state.clone()
    }

    /// Receive every event committed from now on.
    pub fn subscribe(&self) -> Subscription<InventoryEvent> {
        self.bus.subscribe()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// The error from the most recent save, cleared by the next successful one.
    pub fn last_save_error(&self) -> Option<&SnapshotError> {
        self.last_save_error.as_ref()
    }

    fn commit(&mut self, command: &InventoryCommand) -> DomainResult<Vec<InventoryEvent>> {
        let events = self.state.execute(command)?;
        if events.is_empty() {
            tracing::debug!("command changed nothing");
            return Ok(events);
        }

        self.persist();

        for event in &events {
            tracing::debug!(
                event_type = event.event_type(),
                product_id = %event.product_id(),
                subscribers = self.bus.subscriber_count(),
                "inventory changed"
            );
            if let Err(err) = self.bus.publish(event.clone()) {
                tracing::error!(?err, "failed to notify subscribers");
            }
        }

        Ok(events)
    }

    fn persist(&mut self) {
        match self.snapshots.save(&self.state) {
            Ok(()) => self.last_save_error = None,
            Err(err) => {
                tracing::error!(error = %err, "failed to save inventory snapshot");
                self.last_save_error = Some(err);
            }
        }
    }
}
