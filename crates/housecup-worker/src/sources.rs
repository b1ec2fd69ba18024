// Event sources for the ingestion loop
//
// - SyntheticEventSource: random house, random delta, one event per period
// - IterEventSource: replays any iterator (tests, fixtures)
// - ChannelEventSource: events pushed from elsewhere in the process

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use housecup_core::{EventSource, House, PointEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Largest absolute points delta the synthetic source emits
const MAX_DELTA: i64 = 10;

/// Endless stream of synthetic point events, one per `period`
pub struct SyntheticEventSource {
    period: Duration,
    rng: StdRng,
}

impl SyntheticEventSource {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for tests
    pub fn with_seed(period: Duration, seed: u64) -> Self {
        Self {
            period,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn generate(&mut self) -> PointEvent {
        let house = House::ALL[self.rng.gen_range(0..House::ALL.len())];
        let magnitude = self.rng.gen_range(1..=MAX_DELTA);
        let points = if self.rng.gen_bool(0.5) {
            magnitude
        } else {
            -magnitude
        };

        PointEvent::for_house(Uuid::now_v7().to_string(), house, points, Utc::now())
    }
}

#[async_trait]
impl EventSource for SyntheticEventSource {
    async fn next_event(&mut self) -> Option<PointEvent> {
        tokio::time::sleep(self.period).await;
        Some(self.generate())
    }
}

/// Adapts an iterator of events; ends when the iterator does
pub struct IterEventSource<I> {
    events: I,
}

impl<I> IterEventSource<I>
where
    I: Iterator<Item = PointEvent>,
{
    pub fn new(events: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            events: events.into_iter(),
        }
    }
}

#[async_trait]
impl<I> EventSource for IterEventSource<I>
where
    I: Iterator<Item = PointEvent> + Send,
{
    async fn next_event(&mut self) -> Option<PointEvent> {
        self.events.next()
    }
}

/// Receives events sent through an mpsc channel; ends when all senders drop
pub struct ChannelEventSource {
    rx: mpsc::Receiver<PointEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: mpsc::Receiver<PointEvent>) -> Self {
        Self { rx }
    }

    /// Create a bounded channel and the source reading from it
    pub fn channel(capacity: usize) -> (mpsc::Sender<PointEvent>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx))
    }
}

#[async_trait]
impl EventSource for ChannelEventSource {
    async fn next_event(&mut self) -> Option<PointEvent> {
        self.rx.recv().await
    }
}
