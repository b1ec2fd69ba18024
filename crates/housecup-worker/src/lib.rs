// Background ingestion for the House Cup points service
//
// The worker drains an EventSource into the event store on its own tokio
// task. Failures are logged per event and never stop the loop.

pub mod config;
pub mod ingestion;
pub mod sources;

pub use config::IngestionConfig;
pub use ingestion::{IngestionHandle, IngestionStats, IngestionWorker};
pub use sources::{ChannelEventSource, IterEventSource, SyntheticEventSource};
