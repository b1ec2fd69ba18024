// Points service: windowed per-house totals

use chrono::{DateTime, Utc};
use housecup_core::Window;
use housecup_storage::{Database, Result};
use std::sync::Arc;

use crate::points::HousePoints;

pub struct PointsService {
    db: Arc<Database>,
}

impl PointsService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Totals for every known house over `window`, measured back from now
    pub async fn totals(&self, window: Window) -> Result<HousePoints> {
        self.totals_at(window, Utc::now()).await
    }

    pub async fn totals_at(&self, window: Window, now: DateTime<Utc>) -> Result<HousePoints> {
        let sums = self.db.sum_points_by_category(window.start(now)).await?;
        Ok(HousePoints::from_sums(&sums))
    }
}
