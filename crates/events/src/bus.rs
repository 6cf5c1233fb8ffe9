//! Publish/subscribe abstraction (mechanics only).
//!
//! The bus carries change notifications from the store to its observers.
//! Each subscriber receives a copy of every message published after it
//! subscribed; there is no replay and no batching.

use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

/// A subscription to a message stream.
///
/// Subscriptions are consumed from a single thread. Messages arrive in publish
/// order.
///
/// ```ignore
/// let subscription = store.subscribe();
/// store.add_product(fields);
///
/// while let Ok(event) = subscription.try_recv() {
///     render(event);
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain every message that is already queued, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Transport-agnostic publish/subscribe contract.
///
/// `publish` may fail (e.g. a poisoned lock); callers decide whether that
/// matters. The store treats notification as best-effort since its state has
/// already been committed when it publishes.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;

    /// Number of live subscribers, as of the last publish.
    fn subscriber_count(&self) -> usize;
}

