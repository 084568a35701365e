use chrono::{DateTime, Utc};

/// Something that happened to a dispenser, published after it was applied.
///
/// Subscribers see events in the order the machine applied them. The type
/// name is dotted and stable so log filters and observers can match on it,
/// e.g. "dispenser.status.cleared".
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn event_type(&self) -> &'static str;

    /// Wall-clock time the command producing this event was issued.
    fn occurred_at(&self) -> DateTime<Utc>;
}
