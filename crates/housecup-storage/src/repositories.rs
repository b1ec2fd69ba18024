// Repository layer for database operations
// Decision: WAL journal so the ingestion writer does not block readers

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use housecup_core::{format_timestamp, PointEvent};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::StoreConfig;
use crate::error::{Result, StorageError};
use crate::models::*;

const CREATE_EVENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS house_points (
        id TEXT PRIMARY KEY,
        category TEXT,
        points INTEGER,
        timestamp DATETIME
    )
"#;

const CREATE_CATEGORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_category ON house_points (category)";

const CREATE_TIMESTAMP_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_timestamp ON house_points (timestamp)";

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    location: String,
}

impl Database {
    pub fn new(pool: SqlitePool, location: impl Into<String>) -> Self {
        Self {
            pool,
            location: location.into(),
        }
    }

    /// Open (creating if missing) the SQLite file named by `config`
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        let location = std::path::absolute(&config.path)
            .unwrap_or_else(|_| config.path.clone())
            .display()
            .to_string();

        tracing::info!(path = %location, "Opened event store");

        Ok(Self::new(pool, location))
    }

    /// Close every pooled connection; later operations fail
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!(path = %self.location, "Closed event store");
    }

    /// Identifier of the backing file, reported by diagnostics
    pub fn location(&self) -> &str {
        &self.location
    }

    // ============================================
    // Schema
    // ============================================

    /// Create the events table and its indexes. Safe to call on every start.
    pub async fn initialize(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(CREATE_EVENTS_TABLE).execute(&mut *tx).await?;
        sqlx::query(CREATE_CATEGORY_INDEX).execute(&mut *tx).await?;
        sqlx::query(CREATE_TIMESTAMP_INDEX).execute(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!(table = EVENTS_TABLE, "Event store initialized");
        Ok(())
    }

    pub async fn table_exists(&self) -> Result<bool> {
        let found: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(EVENTS_TABLE)
        .fetch_one(&self.pool)
        .await?;

        Ok(found > 0)
    }

    // ============================================
    // Events (append-only)
    // ============================================

    /// Append one event. Fails with `DuplicateId` if the id is already stored.
    pub async fn insert_event(&self, event: &PointEvent) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO house_points (id, category, points, timestamp)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&event.id)
        .bind(&event.category)
        .bind(event.points)
        .bind(format_timestamp(&event.timestamp))
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::from_insert(e, &event.id))?;

        Ok(())
    }

    #[cfg(test)]
    pub(crate) async fn get_event(&self, id: &str) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, category, points, timestamp
            FROM house_points
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn count_events(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM house_points")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // ============================================
    // Aggregation
    // ============================================

    /// Sum points per category, optionally only for `timestamp >= window_start`.
    ///
    /// Only categories that appear in the result set are returned; filling in
    /// zeroes for known houses is the caller's job.
    pub async fn sum_points_by_category(
        &self,
        window_start: Option<DateTime<Utc>>,
    ) -> Result<HashMap<String, i64>> {
        let rows = match window_start {
            None => {
                sqlx::query_as::<_, CategorySumRow>(
                    r#"
                    SELECT category, SUM(points) AS points
                    FROM house_points
                    GROUP BY category
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
            Some(start) => {
                sqlx::query_as::<_, CategorySumRow>(
                    r#"
                    SELECT category, SUM(points) AS points
                    FROM house_points
                    WHERE timestamp >= ?
                    GROUP BY category
                    "#,
                )
                .bind(format_timestamp(&start))
                .fetch_all(&self.pool)
                .await?
            }
        };

        let sums = rows
            .into_iter()
            .filter_map(|row| Some((row.category?, row.points?)))
            .collect();

        Ok(sums)
    }

    /// Row count and point total for every category in the table
    pub async fn count_and_sum_by_category(&self) -> Result<Vec<CategoryTotalsRow>> {
        let rows = sqlx::query_as::<_, CategoryTotalsRow>(
            r#"
            SELECT category, COUNT(*) AS count, COALESCE(SUM(points), 0) AS points
            FROM house_points
            GROUP BY category
            ORDER BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    async fn test_db() -> (TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("points.db"));
        let db = Database::open(&config).await.unwrap();
        db.initialize().await.unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let (_dir, db) = test_db().await;

        db.initialize().await.unwrap();
        db.initialize().await.unwrap();

        assert!(db.table_exists().await.unwrap());
        assert_eq!(db.count_events().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_table_missing_before_initialize() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&StoreConfig::new(dir.path().join("fresh.db")))
            .await
            .unwrap();

        assert!(!db.table_exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_location_names_the_file() {
        let (_dir, db) = test_db().await;
        assert!(db.location().ends_with("points.db"));
    }

    #[tokio::test]
    async fn test_insert_increases_category_sum() {
        let (_dir, db) = test_db().await;
        let now = Utc::now();

        db.insert_event(&PointEvent::new("a", "Huff", 4, now))
            .await
            .unwrap();
        let before = db.sum_points_by_category(None).await.unwrap();

        db.insert_event(&PointEvent::new("b", "Huff", -9, now))
            .await
            .unwrap();
        let after = db.sum_points_by_category(None).await.unwrap();

        assert_eq!(before["Huff"], 4);
        assert_eq!(after["Huff"], before["Huff"] - 9);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected_and_original_kept() {
        let (_dir, db) = test_db().await;
        let now = Utc::now();

        db.insert_event(&PointEvent::new("dup", "Gryff", 10, now))
            .await
            .unwrap();
        let err = db
            .insert_event(&PointEvent::new("dup", "Slyth", 50, now))
            .await
            .unwrap_err();

        assert!(err.is_duplicate());
        assert!(matches!(err, StorageError::DuplicateId(ref id) if id == "dup"));

        let row = db.get_event("dup").await.unwrap().unwrap();
        assert_eq!(row.category.as_deref(), Some("Gryff"));
        assert_eq!(row.points, Some(10));
        assert_eq!(db.count_events().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_stored_timestamp_is_normalized() {
        let (_dir, db) = test_db().await;
        let ts = DateTime::parse_from_rfc3339("2026-10-18T14:00:00+02:00")
            .unwrap()
            .with_timezone(&Utc);

        db.insert_event(&PointEvent::new("tz", "Raven", 1, ts))
            .await
            .unwrap();

        let row = db.get_event("tz").await.unwrap().unwrap();
        assert_eq!(row.timestamp.as_deref(), Some("2026-10-18T12:00:00.000000Z"));
    }

    #[tokio::test]
    async fn test_window_excludes_older_events() {
        let (_dir, db) = test_db().await;
        let now = Utc::now();

        db.insert_event(&PointEvent::new("old", "Raven", 100, now - Duration::hours(2)))
            .await
            .unwrap();
        db.insert_event(&PointEvent::new("new", "Raven", 5, now))
            .await
            .unwrap();

        let windowed = db
            .sum_points_by_category(Some(now - Duration::minutes(5)))
            .await
            .unwrap();
        let all = db.sum_points_by_category(None).await.unwrap();

        assert_eq!(windowed["Raven"], 5);
        assert_eq!(all["Raven"], 105);
    }

    #[tokio::test]
    async fn test_window_includes_out_of_order_arrivals() {
        let (_dir, db) = test_db().await;
        let now = Utc::now();

        db.insert_event(&PointEvent::new("late", "Slyth", 3, now))
            .await
            .unwrap();
        db.insert_event(&PointEvent::new("early", "Slyth", 2, now - Duration::minutes(1)))
            .await
            .unwrap();

        let sums = db
            .sum_points_by_category(Some(now - Duration::minutes(5)))
            .await
            .unwrap();
        assert_eq!(sums["Slyth"], 5);
    }

    #[tokio::test]
    async fn test_window_start_is_inclusive() {
        let (_dir, db) = test_db().await;
        let start = DateTime::parse_from_rfc3339("2026-10-18T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        db.insert_event(&PointEvent::new("edge", "Huff", 3, start))
            .await
            .unwrap();
        db.insert_event(&PointEvent::new("before", "Huff", 40, start - Duration::microseconds(1)))
            .await
            .unwrap();

        let sums = db.sum_points_by_category(Some(start)).await.unwrap();
        assert_eq!(sums["Huff"], 3);
    }

    #[tokio::test]
    async fn test_operations_fail_after_close() {
        let (_dir, db) = test_db().await;

        db.close().await;

        let err = db.sum_points_by_category(None).await.unwrap_err();
        assert!(matches!(err, StorageError::Database(_)));
    }

    #[tokio::test]
    async fn test_future_window_is_empty() {
        let (_dir, db) = test_db().await;

        db.insert_event(&PointEvent::new("x", "Gryff", 7, Utc::now()))
            .await
            .unwrap();

        let sums = db
            .sum_points_by_category(Some(Utc::now() + Duration::days(1)))
            .await
            .unwrap();
        assert!(sums.is_empty());
    }

    #[tokio::test]
    async fn test_count_and_sum_by_category() {
        let (_dir, db) = test_db().await;
        let now = Utc::now();

        for (id, category, points) in [
            ("1", "Gryff", 10),
            ("2", "Gryff", -3),
            ("3", "Huff", 2),
            ("4", "Durmstrang", 9),
        ] {
            db.insert_event(&PointEvent::new(id, category, points, now))
                .await
                .unwrap();
        }

        let totals = db.count_and_sum_by_category().await.unwrap();
        assert_eq!(
            totals,
            vec![
                CategoryTotalsRow {
                    category: Some("Durmstrang".to_string()),
                    count: 1,
                    points: 9
                },
                CategoryTotalsRow {
                    category: Some("Gryff".to_string()),
                    count: 2,
                    points: 7
                },
                CategoryTotalsRow {
                    category: Some("Huff".to_string()),
                    count: 1,
                    points: 2
                },
            ]
        );
        assert_eq!(db.count_events().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_count_and_sum_empty_store() {
        let (_dir, db) = test_db().await;
        assert!(db.count_and_sum_by_category().await.unwrap().is_empty());
    }
}
