use color_eyre::eyre::{eyre, WrapErr};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::app::flight::{FlightTiming, ARC_REL_LEN, FLIGHT_TIME};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILE: &str = "host_city_explorer.log";

/// Settings resolved from `.env`, the environment and CLI overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub flight: FlightTiming,
    pub log_file: PathBuf,
    pub debug: bool,
}

/// Initializes the application configuration from the process environment.
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    from_lookup(|key| env::var(key).ok())
}

/// Builds the configuration from any key lookup, so tests need not touch the
/// real environment.
pub fn from_lookup<F>(lookup: F) -> color_eyre::eyre::Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let api_base_url = lookup("ATHLETE_API_URL")
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
        return Err(eyre!(
            "ATHLETE_API_URL must be an http(s) URL, got {api_base_url}"
        ));
    }

    let timeout_secs = match lookup("ATHLETE_API_TIMEOUT_SECS") {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .wrap_err_with(|| format!("Invalid ATHLETE_API_TIMEOUT_SECS: {raw}"))?,
        None => DEFAULT_TIMEOUT_SECS,
    };
    if timeout_secs == 0 {
        return Err(eyre!("ATHLETE_API_TIMEOUT_SECS must be at least 1"));
    }

    let flight_time = match lookup("FLIGHT_TIME_MS") {
        Some(raw) => Duration::from_millis(
            raw.trim()
                .parse::<u64>()
                .wrap_err_with(|| format!("Invalid FLIGHT_TIME_MS: {raw}"))?,
        ),
        None => FLIGHT_TIME,
    };
    if flight_time.is_zero() {
        return Err(eyre!("FLIGHT_TIME_MS must be at least 1"));
    }

    let arc_rel_len = match lookup("ARC_REL_LEN") {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .wrap_err_with(|| format!("Invalid ARC_REL_LEN: {raw}"))?,
        None => ARC_REL_LEN,
    };
    if !(arc_rel_len > 0.0 && arc_rel_len <= 1.0) {
        return Err(eyre!("ARC_REL_LEN must be in (0, 1], got {arc_rel_len}"));
    }

    let log_file = lookup("LOG_FILE")
        .filter(|path| !path.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);

    Ok(AppConfig {
        api_base_url,
        request_timeout: Duration::from_secs(timeout_secs),
        flight: FlightTiming {
            flight_time,
            arc_rel_len,
        },
        log_file,
        debug: lookup("DEBUG").is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() -> color_eyre::eyre::Result<()> {
        let config = from_lookup(lookup(&[]))?;

        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.flight, FlightTiming::default());
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert!(!config.debug);
        Ok(())
    }

    #[test]
    fn overrides_are_read() -> color_eyre::eyre::Result<()> {
        let config = from_lookup(lookup(&[
            ("ATHLETE_API_URL", "https://athletes.example.org/"),
            ("ATHLETE_API_TIMEOUT_SECS", "3"),
            ("FLIGHT_TIME_MS", "1500"),
            ("ARC_REL_LEN", "0.25"),
            ("LOG_FILE", "/tmp/explorer.log"),
            ("DEBUG", "1"),
        ]))?;

        assert_eq!(config.api_base_url, "https://athletes.example.org/");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.flight.flight_time, Duration::from_millis(1500));
        assert!((config.flight.arc_rel_len - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.log_file, PathBuf::from("/tmp/explorer.log"));
        assert!(config.debug);
        Ok(())
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(from_lookup(lookup(&[("ATHLETE_API_TIMEOUT_SECS", "soon")])).is_err());
        assert!(from_lookup(lookup(&[("ATHLETE_API_TIMEOUT_SECS", "0")])).is_err());
        assert!(from_lookup(lookup(&[("ARC_REL_LEN", "1.5")])).is_err());
        assert!(from_lookup(lookup(&[("FLIGHT_TIME_MS", "-1")])).is_err());
        assert!(from_lookup(lookup(&[("ATHLETE_API_URL", "ftp://nowhere")])).is_err());
    }
}
