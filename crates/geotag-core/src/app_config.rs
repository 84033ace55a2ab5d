use std::path::PathBuf;

/// Process-level configuration read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub settings_path: PathBuf,
    pub log_level: String,
    pub geocoder_base_url: String,
    pub geocoder_user_agent: String,
    pub geocoder_timeout_secs: u64,
    pub geocoder_min_interval_ms: u64,
}
