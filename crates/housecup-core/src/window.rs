// Aggregation windows
// Decision: unknown window values fall back to All rather than being rejected

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use crate::error::ValidationError;

/// Relative time range applied before aggregating points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    #[default]
    All,
    FiveMinutes,
    OneHour,
}

impl Window {
    /// Parse a query-string value, falling back to `All` for absent or
    /// unrecognised input.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            None => Window::All,
            Some(raw) => raw.parse().unwrap_or_else(|e: ValidationError| {
                tracing::debug!(error = %e, "Falling back to window=all");
                Window::All
            }),
        }
    }

    /// Lower bound for `timestamp >= start`, or `None` for no bound
    pub fn start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Window::All => None,
            Window::FiveMinutes => Some(now - Duration::minutes(5)),
            Window::OneHour => Some(now - Duration::hours(1)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Window::All => "all",
            Window::FiveMinutes => "5min",
            Window::OneHour => "1hour",
        }
    }
}

impl FromStr for Window {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Window::All),
            "5min" => Ok(Window::FiveMinutes),
            "1hour" => Ok(Window::OneHour),
            other => Err(ValidationError::UnknownWindow(other.to_string())),
        }
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
