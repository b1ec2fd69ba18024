// SQLite storage layer with sqlx
//
// One append-only table, `house_points`, plus the grouped queries the API
// needs. Every operation checks a connection out of the pool, so the
// ingestion task and request handlers never share connection state.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;

pub use config::StoreConfig;
pub use error::{Result, StorageError};
pub use models::*;
pub use repositories::*;
