// Ingestion loop
// Decision: log-and-skip on insert failure, no retry or backoff
// Decision: shutdown via watch channel so the task ends with the process
//
// Single "running" state: await the next event, insert it, repeat. The loop
// ends when the source is exhausted or shutdown is signalled. An insert that
// is already in flight always completes before shutdown is observed.

use anyhow::{Context, Result};
use housecup_core::EventSource;
use housecup_storage::Database;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Emit a progress line every this many consumed events
const PROGRESS_EVERY: u64 = 10;

/// Counters reported when the loop stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionStats {
    pub ingested: u64,
    pub failed: u64,
}

impl IngestionStats {
    pub fn consumed(&self) -> u64 {
        self.ingested + self.failed
    }
}

/// Drains an `EventSource` into the event store
pub struct IngestionWorker<S> {
    db: Database,
    source: S,
    shutdown_rx: watch::Receiver<bool>,
}

impl<S> IngestionWorker<S>
where
    S: EventSource + 'static,
{
    pub fn new(db: Database, source: S, shutdown_rx: watch::Receiver<bool>) -> Self {
        Self {
            db,
            source,
            shutdown_rx,
        }
    }

    /// Spawn the loop on its own tokio task
    pub fn spawn(db: Database, source: S) -> IngestionHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let worker = Self::new(db, source, shutdown_rx);
        let task = tokio::spawn(worker.run());

        IngestionHandle { shutdown_tx, task }
    }

    /// Run until the source ends or shutdown is signalled
    pub async fn run(mut self) -> IngestionStats {
        info!("Starting event ingestion");
        let mut stats = IngestionStats::default();

        loop {
            let next = tokio::select! {
                biased;
                _ = self.shutdown_rx.changed() => {
                    info!("Shutdown signal received, stopping ingestion");
                    break;
                }
                next = self.source.next_event() => next,
            };

            let Some(event) = next else {
                info!("Event source exhausted, stopping ingestion");
                break;
            };

            match self.db.insert_event(&event).await {
                Ok(()) => {
                    stats.ingested += 1;
                    debug!(
                        event_id = %event.id,
                        category = %event.category,
                        points = event.points,
                        "Ingested event"
                    );
                }
                Err(e) => {
                    stats.failed += 1;
                    error!(event_id = %event.id, error = %e, "Error ingesting event");
                }
            }

            if stats.consumed() % PROGRESS_EVERY == 0 {
                info!(
                    ingested = stats.ingested,
                    failed = stats.failed,
                    "Ingested {} events so far",
                    stats.consumed()
                );
            }
        }

        info!(
            ingested = stats.ingested,
            failed = stats.failed,
            "Event ingestion stopped"
        );
        stats
    }
}

/// Handle to a running ingestion task
pub struct IngestionHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<IngestionStats>,
}

impl IngestionHandle {
    /// Ask the loop to stop after its current event
    pub fn signal_shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Signal shutdown and wait for the loop to stop
    pub async fn shutdown(self) -> Result<IngestionStats> {
        self.signal_shutdown();
        self.join().await
    }

    /// Wait for the loop to stop on its own (source exhausted)
    pub async fn join(self) -> Result<IngestionStats> {
        self.task.await.context("Ingestion task failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{ChannelEventSource, IterEventSource};
    use chrono::Utc;
    use housecup_core::PointEvent;
    use housecup_storage::StoreConfig;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn test_db() -> (TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&StoreConfig::new(dir.path().join("ingest.db")))
            .await
            .unwrap();
        db.initialize().await.unwrap();
        (dir, db)
    }

    async fn wait_for_count(db: &Database, expected: i64) {
        for _ in 0..200 {
            if db.count_events().await.unwrap() == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("store never reached {expected} events");
    }

    #[tokio::test]
    async fn test_ingests_until_source_ends() {
        let (_dir, db) = test_db().await;
        let now = Utc::now();
        let events = (0..12).map(move |i| PointEvent::new(format!("e{i}"), "Gryff", 1, now));

        let handle = IngestionWorker::spawn(db.clone(), IterEventSource::new(events));
        let stats = handle.join().await.unwrap();

        assert_eq!(stats, IngestionStats { ingested: 12, failed: 0 });
        assert_eq!(db.sum_points_by_category(None).await.unwrap()["Gryff"], 12);
    }

    #[tokio::test]
    async fn test_duplicate_is_logged_and_skipped() {
        let (_dir, db) = test_db().await;
        let now = Utc::now();
        let events = vec![
            PointEvent::new("a", "Huff", 5, now),
            PointEvent::new("a", "Huff", 100, now),
            PointEvent::new("b", "Huff", 1, now),
        ];

        let handle = IngestionWorker::spawn(db.clone(), IterEventSource::new(events));
        let stats = handle.join().await.unwrap();

        assert_eq!(stats, IngestionStats { ingested: 2, failed: 1 });
        assert_eq!(db.sum_points_by_category(None).await.unwrap()["Huff"], 6);
    }

    #[tokio::test]
    async fn test_shutdown_stops_waiting_loop() {
        let (_dir, db) = test_db().await;
        let (tx, source) = ChannelEventSource::channel(8);

        let handle = IngestionWorker::spawn(db.clone(), source);
        tx.send(PointEvent::new("live", "Slyth", 2, Utc::now()))
            .await
            .unwrap();
        wait_for_count(&db, 1).await;

        // The sender is still alive, so only the shutdown signal can end the loop
        assert!(!handle.is_finished());
        let stats = tokio::time::timeout(Duration::from_secs(5), handle.shutdown())
            .await
            .expect("ingestion did not stop")
            .unwrap();

        assert_eq!(stats, IngestionStats { ingested: 1, failed: 0 });
        drop(tx);
    }

    #[test]
    fn test_stats_consumed() {
        let stats = IngestionStats {
            ingested: 7,
            failed: 3,
        };
        assert_eq!(stats.consumed(), 10);
    }
}
