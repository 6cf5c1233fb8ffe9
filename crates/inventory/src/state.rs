use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::entity::position_of;
use stockroom_core::{DomainError, DomainResult, MovementId, ProductId};

use crate::event::{InventoryEvent, MovementRecorded, ProductAdded, ProductDeleted, ProductUpdated};
use crate::movement::{Movement, NewMovement};
use crate::product::{Category, NewProduct, Product, ProductPatch};

/// Command: AddProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddProduct {
    pub product_id: ProductId,
    pub fields: NewProduct,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProduct {
    pub product_id: ProductId,
    pub patch: ProductPatch,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeleteProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteProduct {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RecordMovement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMovement {
    pub movement_id: MovementId,
    pub fields: NewMovement,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    AddProduct(AddProduct),
    UpdateProduct(UpdateProduct),
    DeleteProduct(DeleteProduct),
    RecordMovement(RecordMovement),
}

/// Products and movements, in insertion order.
///
/// Transitions are pure: `handle` decides which events a command produces
/// without touching state, `apply` evolves state from one event. Every command
/// yields at most one event, so a single `apply` is a complete transition and
/// nothing can observe a half-applied change (e.g. a deleted product whose
/// movements are still present).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryState {
    products: Vec<Product>,
    movements: Vec<Movement>,
}

impl InventoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build state from persisted collections, rejecting inconsistent input.
    pub fn from_parts(products: Vec<Product>, movements: Vec<Movement>) -> DomainResult<Self> {
        let state = Self { products, movements };
        state.verify()?;
        Ok(state)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    pub fn products_in(&self, category: Category) -> Vec<&Product> {
        self.products.iter().filter(|p| p.category == category).collect()
    }

    pub fn movements_for<'a>(&'a self, id: &'a ProductId) -> impl Iterator<Item = &'a Movement> + 'a {
        self.movements.iter().filter(move |m| m.product_id == *id)
    }

    /// Check the cross-collection invariants: unique ids and no movement
    /// pointing at a missing product.
    pub fn verify(&self) -> DomainResult<()> {
        let mut product_ids: Vec<&ProductId> = self.products.iter().map(|p| &p.id).collect();
        product_ids.sort();
        if product_ids.windows(2).any(|w| w[0] == w[1]) {
            return Err(DomainError::invariant("duplicate product id"));
        }

        let mut movement_ids: Vec<&MovementId> = self.movements.iter().map(|m| &m.id).collect();
        movement_ids.sort();
        if movement_ids.windows(2).any(|w| w[0] == w[1]) {
            return Err(DomainError::invariant("duplicate movement id"));
        }

        if let Some(dangling) = self
            .movements
            .iter()
            .find(|m| product_ids.binary_search(&&m.product_id).is_err())
        {
            return Err(DomainError::invariant(format!(
                "movement {} references missing product {}",
                dangling.id, dangling.product_id
            )));
        }

        Ok(())
    }

    /// Decide the events for `command`. Does not mutate state.
    pub fn handle(&self, command: &InventoryCommand) -> DomainResult<Vec<InventoryEvent>> {
        match command {
            InventoryCommand::AddProduct(cmd) => self.handle_add_product(cmd),
            InventoryCommand::UpdateProduct(cmd) => self.handle_update_product(cmd),
            InventoryCommand::DeleteProduct(cmd) => Ok(self.handle_delete_product(cmd)),
            InventoryCommand::RecordMovement(cmd) => self.handle_record_movement(cmd),
        }
    }

    /// Evolve state from a single event.
    pub fn apply(&mut self, event: &InventoryEvent) {
        match event {
            InventoryEvent::ProductAdded(e) => {
                self.products.push(e.product.clone());
            }
            InventoryEvent::ProductUpdated(e) => {
                if let Some(idx) = position_of(&self.products, &e.product.id) {
                    self.products[idx] = e.product.clone();
                }
            }
            InventoryEvent::ProductDeleted(e) => {
                let id = e.product.id;
                self.products.retain(|p| p.id != id);
                self.movements.retain(|m| m.product_id != id);
            }
            InventoryEvent::MovementRecorded(e) => {
                if let Some(idx) = position_of(&self.products, &e.movement.product_id) {
                    self.products[idx].quantity = e.resulting_quantity;
                    self.movements.push(e.movement.clone());
                }
            }
        }
    }

    /// `handle` followed by `apply` for each produced event.
    pub fn execute(&mut self, command: &InventoryCommand) -> DomainResult<Vec<InventoryEvent>> {
        let events = self.handle(command)?;
        for event in &events {
            self.apply(event);
        }
        Ok(events)
    }

    fn handle_add_product(&self, cmd: &AddProduct) -> DomainResult<Vec<InventoryEvent>> {
        if self.product(&cmd.product_id).is_some() {
            return Err(DomainError::invariant("product id already exists"));
        }
        let product = Product::from_fields(cmd.product_id, cmd.fields.clone(), cmd.occurred_at);
        Ok(vec![InventoryEvent::ProductAdded(ProductAdded {
            product,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update_product(&self, cmd: &UpdateProduct) -> DomainResult<Vec<InventoryEvent>> {
        let current = self.product(&cmd.product_id).ok_or(DomainError::NotFound)?;
        Ok(vec![InventoryEvent::ProductUpdated(ProductUpdated {
            product: cmd.patch.merged_into(current),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_delete_product(&self, cmd: &DeleteProduct) -> Vec<InventoryEvent> {
        let Some(product) = self.product(&cmd.product_id) else {
            return Vec::new();
        };
        vec![InventoryEvent::ProductDeleted(ProductDeleted {
            product: product.clone(),
            removed_movements: self.movements_for(&cmd.product_id).cloned().collect(),
            occurred_at: cmd.occurred_at,
        })]
    }

    fn handle_record_movement(&self, cmd: &RecordMovement) -> DomainResult<Vec<InventoryEvent>> {
        let product = self.product(&cmd.fields.product_id).ok_or(DomainError::NotFound)?;
        if position_of(&self.movements, &cmd.movement_id).is_some() {
            return Err(DomainError::invariant("movement id already exists"));
        }

        let change = cmd.fields.kind.apply(product.quantity, cmd.fields.quantity);
        let movement = Movement::from_fields(cmd.movement_id, cmd.fields.clone(), cmd.occurred_at);

        Ok(vec![InventoryEvent::MovementRecorded(MovementRecorded {
            movement,
            resulting_quantity: change.resulting_quantity,
            clamped: change.clamped,
        })])
    }
}
