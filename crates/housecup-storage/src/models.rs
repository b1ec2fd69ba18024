// Database models (internal, may differ from public DTOs)

use sqlx::FromRow;

/// Table holding every ingested event
pub const EVENTS_TABLE: &str = "house_points";

/// `SELECT category, SUM(points)` grouped by category
#[derive(Debug, Clone, FromRow)]
pub struct CategorySumRow {
    pub category: Option<String>,
    pub points: Option<i64>,
}

/// Per-category diagnostics: row count and point total
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CategoryTotalsRow {
    pub category: Option<String>,
    pub count: i64,
    pub points: i64,
}

/// A stored event as read back from `house_points`
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EventRow {
    pub id: String,
    pub category: Option<String>,
    pub points: Option<i64>,
    pub timestamp: Option<String>,
}
