//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus distributes events to any number of observers (a terminal front end,
//! a test, a log shipper). It does not store anything: the dispenser's state is
//! the source of truth and the bus only announces changes to it.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// A subscription to an event stream.
///
/// Each subscription gets a copy of every event published after it was
/// created (broadcast semantics). Subscriptions are meant for a single
/// consumer thread.
///
/// ```ignore
/// let subscription = store.subscribe();
///
/// store.dispense_drink(&coffee);
/// for envelope in subscription.drain() {
///     println!("{}", envelope.payload().event_type());
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
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain every message that is already queued.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// Messages are delivered in publication order to every live subscriber.
/// `publish()` may fail; callers decide whether that matters. The dispenser
/// treats publication as best effort because its state has already changed.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
