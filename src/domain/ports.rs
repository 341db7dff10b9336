use crate::domain::model::{InboundEvent, OutboundSignal, RoundId};
use async_trait::async_trait;
use std::time::Duration;

/// Receives every signal the core emits, in emission order.
pub trait EventSink {
    fn emit(&mut self, signal: OutboundSignal);
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    fn emit(&mut self, signal: OutboundSignal) {
        (**self).emit(signal)
    }
}

/// A scheduled tick stream. Once cancelled (or dropped) no further tick for it is delivered.
pub trait TickHandle {
    fn cancel(&mut self);
    fn is_active(&self) -> bool;
}

/// Starts a periodic `TickElapsed { round }` stream with the given period.
pub trait TickScheduler {
    type Handle: TickHandle;

    fn schedule(&mut self, round: RoundId, period: Duration) -> Self::Handle;
}

#[async_trait]
pub trait EventSource: Send {
    /// `None` means the source is exhausted.
    async fn next_event(&mut self) -> Option<InboundEvent>;
}
