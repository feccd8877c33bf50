use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use fxconv_core::fx::LatestPolicy;
use fxconv_market_data::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Open Exchange Rates key; only needed when rates must be fetched
    pub app_id: Option<String>,
    pub api_url: String,
    pub archive_file: PathBuf,
    pub output_file: PathBuf,
    /// Custom symbol table; the bundled one is used when unset
    pub symbol_table: Option<PathBuf>,
    pub request_timeout: Duration,
    pub latest_policy: LatestPolicy,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let timeout_ms: u64 = non_empty("FXCONV_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|| "30000".into())
            .trim()
            .parse()
            .context("Invalid FXCONV_REQUEST_TIMEOUT_MS")?;
        if timeout_ms == 0 {
            return Err(anyhow!("FXCONV_REQUEST_TIMEOUT_MS must be greater than zero"));
        }

        let latest_policy = match non_empty("FXCONV_LATEST_POLICY") {
            Some(raw) => raw
                .parse::<LatestPolicy>()
                .map_err(|e| anyhow!("Invalid FXCONV_LATEST_POLICY: {}", e))?,
            None => LatestPolicy::default(),
        };

        let log_format = match non_empty("FXCONV_LOG_FORMAT") {
            Some(raw) if raw.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(raw) if raw.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(raw) => {
                return Err(anyhow!(
                    "Invalid FXCONV_LOG_FORMAT '{}', expected 'text' or 'json'",
                    raw
                ))
            }
            None => LogFormat::Text,
        };

        Ok(Self {
            app_id: non_empty("FXCONV_APP_ID"),
            api_url: non_empty("FXCONV_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            archive_file: non_empty("FXCONV_ARCHIVE_FILE")
                .unwrap_or_else(|| "./data/rates_archive.json".into())
                .into(),
            output_file: non_empty("FXCONV_OUTPUT_FILE")
                .unwrap_or_else(|| "./data/conversion.json".into())
                .into(),
            symbol_table: non_empty("FXCONV_SYMBOL_TABLE").map(PathBuf::from),
            request_timeout: Duration::from_millis(timeout_ms),
            latest_policy,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.app_id, None);
        assert_eq!(config.api_url, DEFAULT_BASE_URL);
        assert_eq!(config.archive_file, PathBuf::from("./data/rates_archive.json"));
        assert_eq!(config.output_file, PathBuf::from("./data/conversion.json"));
        assert_eq!(config.symbol_table, None);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.latest_policy, LatestPolicy::AlwaysFetch);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("FXCONV_APP_ID", "abc123"),
            ("FXCONV_API_URL", "http://127.0.0.1:9000/api"),
            ("FXCONV_ARCHIVE_FILE", "/tmp/archive.json"),
            ("FXCONV_SYMBOL_TABLE", "/tmp/symbols.json"),
            ("FXCONV_REQUEST_TIMEOUT_MS", "1500"),
            ("FXCONV_LATEST_POLICY", "same-day"),
            ("FXCONV_LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.app_id.as_deref(), Some("abc123"));
        assert_eq!(config.api_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.archive_file, PathBuf::from("/tmp/archive.json"));
        assert_eq!(config.symbol_table, Some(PathBuf::from("/tmp/symbols.json")));
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
        assert_eq!(config.latest_policy, LatestPolicy::SameDay);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_app_id_is_unset() {
        let config = config_from(&[("FXCONV_APP_ID", "  ")]).unwrap();
        assert_eq!(config.app_id, None);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("FXCONV_REQUEST_TIMEOUT_MS", "soon")]).is_err());
        assert!(config_from(&[("FXCONV_LATEST_POLICY", "weekly")]).is_err());
        assert!(config_from(&[("FXCONV_LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = config_from(&[("FXCONV_REQUEST_TIMEOUT_MS", "0")]).unwrap_err();
        assert!(err.to_string().contains("FXCONV_REQUEST_TIMEOUT_MS"));
    }
}
