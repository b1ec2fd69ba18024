// EventSource - the producer side of ingestion
//
// Implementations can:
// - Generate synthetic events on a timer
// - Replay a fixed sequence (tests)
// - Bridge an external feed

use async_trait::async_trait;

use crate::event::PointEvent;

/// A lazy, usually infinite, sequence of point events.
///
/// `next_event` may suspend for as long as it needs. Returning `None` ends
/// the sequence and stops the consumer.
#[async_trait]
pub trait EventSource: Send {
    async fn next_event(&mut self) -> Option<PointEvent>;
}

#[async_trait]
impl<S: EventSource + ?Sized> EventSource for Box<S> {
    async fn next_event(&mut self) -> Option<PointEvent> {
        (**self).next_event().await
    }
}
