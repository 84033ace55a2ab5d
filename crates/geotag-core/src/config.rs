use std::env::VarError;
use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Public Nominatim instance.
pub const DEFAULT_GEOCODER_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// Nominatim's usage policy allows at most one request per second.
pub const MIN_GEOCODER_INTERVAL_MS: u64 = 1000;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Settings file path from `GEOTAG_SETTINGS_PATH`, defaulting to `./geotag.yaml`.
///
/// Reads only that variable, so commands that never geocode do not depend
/// on the geocoder settings being valid.
#[must_use]
pub fn settings_path_from_env() -> PathBuf {
    settings_path_with(&|key: &str| std::env::var(key))
}

/// Tracing filter from `GEOTAG_LOG_LEVEL`, defaulting to `info`.
#[must_use]
pub fn log_level_from_env() -> String {
    log_level_with(&|key: &str| std::env::var(key))
}

fn settings_path_with<F>(lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Result<String, VarError>,
{
    PathBuf::from(lookup("GEOTAG_SETTINGS_PATH").unwrap_or_else(|_| "./geotag.yaml".to_string()))
}

fn log_level_with<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Result<String, VarError>,
{
    lookup("GEOTAG_LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let settings_path = settings_path_with(&lookup);
    let log_level = log_level_with(&lookup);

    let geocoder_base_url = or_default("GEOTAG_GEOCODER_BASE_URL", DEFAULT_GEOCODER_BASE_URL);
    let geocoder_user_agent = or_default("GEOTAG_GEOCODER_USER_AGENT", &default_user_agent());
    let geocoder_timeout_secs = parse_u64("GEOTAG_GEOCODER_TIMEOUT_SECS", "30")?;
    let geocoder_min_interval_ms = parse_u64(
        "GEOTAG_GEOCODER_MIN_INTERVAL_MS",
        &MIN_GEOCODER_INTERVAL_MS.to_string(),
    )?;

    if geocoder_min_interval_ms < MIN_GEOCODER_INTERVAL_MS {
        return Err(ConfigError::InvalidEnvVar {
            var: "GEOTAG_GEOCODER_MIN_INTERVAL_MS".to_string(),
            reason: format!(
                "{geocoder_min_interval_ms} is below the provider minimum of {MIN_GEOCODER_INTERVAL_MS}"
            ),
        });
    }

    if geocoder_user_agent.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "GEOTAG_GEOCODER_USER_AGENT".to_string(),
            reason: "must identify the client".to_string(),
        });
    }

    Ok(AppConfig {
        settings_path,
        log_level,
        geocoder_base_url,
        geocoder_user_agent,
        geocoder_timeout_secs,
        geocoder_min_interval_ms,
    })
}

/// `User-Agent` sent to the geocoding provider unless overridden.
#[must_use]
pub fn default_user_agent() -> String {
    format!("geotag/{} (frontmatter-geocoding)", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
