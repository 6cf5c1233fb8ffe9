use chrono::{DateTime, Utc};

/// A change notification emitted after a committed state transition.
///
/// Events are facts: they describe a transition that already happened and are
/// never edited afterwards.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name (e.g. "inventory.movement.recorded").
    fn event_type(&self) -> &'static str;

    /// When the transition happened (store clock).
    fn occurred_at(&self) -> DateTime<Utc>;
}
