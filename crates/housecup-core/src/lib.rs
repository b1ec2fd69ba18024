// Core domain types for the House Cup points service
//
// This crate is storage- and transport-agnostic:
// - House: the fixed set of categories the API reports on
// - Window: relative aggregation range parsed from query strings
// - PointEvent + EventSource: what the ingestion loop consumes

pub mod error;
pub mod event;
pub mod house;
pub mod source;
pub mod time;
pub mod window;

pub use error::ValidationError;
pub use event::PointEvent;
pub use house::House;
pub use source::EventSource;
pub use time::format_timestamp;
pub use window::Window;
