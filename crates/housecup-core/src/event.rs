// Point events consumed by the ingestion loop

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::house::House;

/// One point-change record.
///
/// `category` is free-form: events for houses outside `House::ALL` are
/// persisted but never reported by the points API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointEvent {
    pub id: String,
    pub category: String,
    pub points: i64,
    pub timestamp: DateTime<Utc>,
}

impl PointEvent {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        points: i64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            points,
            timestamp,
        }
    }

    /// Event for a known house
    pub fn for_house(id: impl Into<String>, house: House, points: i64, timestamp: DateTime<Utc>) -> Self {
        Self::new(id, house.as_str(), points, timestamp)
    }

    /// The known house this event counts towards, if any
    pub fn house(&self) -> Option<House> {
        House::from_category(&self.category)
    }
}
