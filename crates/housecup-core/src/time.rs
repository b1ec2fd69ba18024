// Timestamp rendering shared by writers and window queries

use chrono::{DateTime, SecondsFormat, Utc};

/// Render a timestamp the way it is stored in `house_points.timestamp`.
///
/// Always RFC 3339, microsecond precision, `Z` suffix. The fixed width keeps
/// SQLite text comparison in chronological order.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
