// Diagnostics service: row counts and per-category totals

use housecup_storage::{models::CategoryTotalsRow, Database, Result};
use std::sync::Arc;

use crate::debug::{CategoryStats, DbReport, DebugDbResponse};

pub const TABLE_MISSING: &str = "house_points table does not exist";

pub struct DiagnosticsService {
    db: Arc<Database>,
}

impl DiagnosticsService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn report(&self) -> Result<DebugDbResponse> {
        if !self.db.table_exists().await? {
            return Ok(DebugDbResponse::error(TABLE_MISSING));
        }

        let total_records = self.db.count_events().await?;
        let by_category = self
            .db
            .count_and_sum_by_category()
            .await?
            .into_iter()
            .map(Self::row_to_stats)
            .collect();

        Ok(DebugDbResponse::Report(DbReport {
            table_exists: true,
            total_records,
            by_category,
            database_file: self.db.location().to_string(),
        }))
    }

    fn row_to_stats(row: CategoryTotalsRow) -> CategoryStats {
        CategoryStats {
            category: row.category,
            count: row.count,
            points: row.points,
        }
    }
}
