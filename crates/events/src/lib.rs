//! Change events and the in-process bus that fans them out to subscribers.
//!
//! Presentation surfaces subscribe to the inventory store through this crate;
//! every committed mutation is published as one or more events.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
