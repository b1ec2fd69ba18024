// Ingestion configuration loaded from environment variables

use std::time::Duration;

const DEFAULT_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionConfig {
    /// Spawn the synthetic ingestion loop at startup
    pub enabled: bool,
    /// Delay between synthetic events
    pub interval: Duration,
}

impl IngestionConfig {
    /// Load from `INGEST_ENABLED` and `INGEST_INTERVAL_MS`
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("INGEST_ENABLED").ok().as_deref(),
            std::env::var("INGEST_INTERVAL_MS").ok().as_deref(),
        )
    }

    fn from_values(enabled: Option<&str>, interval_ms: Option<&str>) -> Self {
        let enabled = match enabled.map(|s| s.trim().to_lowercase()) {
            Some(v) if v == "false" || v == "0" || v == "no" => false,
            _ => true,
        };
        let interval_ms = interval_ms
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_INTERVAL_MS);

        Self {
            enabled,
            interval: Duration::from_millis(interval_ms),
        }
    }
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(IngestionConfig::from_values(None, None), IngestionConfig::default());
    }

    #[test]
    fn test_disabled_values() {
        for value in ["false", "FALSE", "0", "no"] {
            assert!(!IngestionConfig::from_values(Some(value), None).enabled);
        }
        assert!(IngestionConfig::from_values(Some("true"), None).enabled);
    }

    #[test]
    fn test_interval_parsing() {
        let config = IngestionConfig::from_values(None, Some("250"));
        assert_eq!(config.interval, Duration::from_millis(250));

        // Invalid or zero intervals fall back to the default
        let config = IngestionConfig::from_values(None, Some("soon"));
        assert_eq!(config.interval, Duration::from_millis(DEFAULT_INTERVAL_MS));
        let config = IngestionConfig::from_values(None, Some("0"));
        assert_eq!(config.interval, Duration::from_millis(DEFAULT_INTERVAL_MS));
    }
}
