use dotenv::from_filename;
use once_cell::sync::Lazy;
use std::env;
use std::sync::{Arc, RwLock};

pub const DEFAULT_ENDPOINT: &str =
    "https://dev-screener-api.assetdash.com/moby_screener/leaderboard/degen_list?compact=false";

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub poll_interval_seconds: u64,
    pub http_timeout_seconds: u64,
    pub preferences_file: String,
    pub explorer_token_url: String,
    pub log_folder: String,
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval_seconds: 10,
            http_timeout_seconds: 15,
            preferences_file: "degen_prefs.json".to_string(),
            explorer_token_url: "https://solscan.io/token".to_string(),
            log_folder: "log".to_string(),
            log_file: "degen_list.log".to_string(),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_or(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

impl Config {
    /// Loads configuration from the "vars.env" file and the process environment.
    pub fn load() -> Self {
        let _ = from_filename("vars.env");
        Self::from_env()
    }

    /// Builds the configuration from the current environment only.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        let endpoint = var_or("DEGEN_LIST_ENDPOINT", &defaults.endpoint);
        let poll_interval_seconds = parse_or("POLL_INTERVAL_SECONDS", defaults.poll_interval_seconds);
        let http_timeout_seconds = parse_or("HTTP_TIMEOUT_SECONDS", defaults.http_timeout_seconds);
        let preferences_file = var_or("PREFERENCES_FILE", &defaults.preferences_file);
        let explorer_token_url = var_or("EXPLORER_TOKEN_URL", &defaults.explorer_token_url);
        let log_folder = var_or("LOG_DIR", &defaults.log_folder);
        let log_file = var_or("LOG_FILE", &defaults.log_file);

        Config {
            endpoint,
            poll_interval_seconds,
            http_timeout_seconds,
            preferences_file,
            explorer_token_url,
            log_folder,
            log_file,
        }
    }
}

pub type SharedConfig = Arc<RwLock<Config>>;
pub static SHARED_CONFIG: Lazy<SharedConfig> = Lazy::new(|| Arc::new(RwLock::new(Config::load())));

fn current() -> Config {
    SHARED_CONFIG
        .read()
        .map(|config| config.clone())
        .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
}

/// Returns the leaderboard endpoint URL.
pub fn get_endpoint() -> String {
    current().endpoint
}

/// Returns the polling interval (in seconds).
pub fn get_poll_interval_seconds() -> u64 {
    current().poll_interval_seconds
}

pub fn get_http_timeout_seconds() -> u64 {
    current().http_timeout_seconds
}

/// Returns the path of the preferences file.
pub fn get_preferences_file() -> String {
    current().preferences_file
}

pub fn get_explorer_token_url() -> String {
    current().explorer_token_url
}

pub fn get_log_folder() -> String {
    current().log_folder
}

pub fn get_log_file() -> String {
    current().log_file
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so env mutation does not race with other cases.
    #[test]
    fn env_overrides_and_fallbacks() {
        env::set_var("POLL_INTERVAL_SECONDS", "3");
        env::set_var("HTTP_TIMEOUT_SECONDS", "not-a-number");
        env::set_var("DEGEN_LIST_ENDPOINT", "  ");
        env::set_var("PREFERENCES_FILE", "/tmp/prefs.json");

        let config = Config::from_env();
        assert_eq!(config.poll_interval_seconds, 3);
        assert_eq!(config.http_timeout_seconds, 15);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.preferences_file, "/tmp/prefs.json");

        env::set_var("POLL_INTERVAL_SECONDS", "0");
        assert_eq!(Config::from_env().poll_interval_seconds, 10);

        env::remove_var("POLL_INTERVAL_SECONDS");
        env::remove_var("HTTP_TIMEOUT_SECONDS");
        env::remove_var("DEGEN_LIST_ENDPOINT");
        env::remove_var("PREFERENCES_FILE");
    }
}
