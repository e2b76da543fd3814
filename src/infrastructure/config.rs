use std::path::PathBuf;

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_VAR: &str = "BACKEND_URL";
/// Backend used when no URL is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const LOG_FILE_NAME: &str = "workout-logger.log";

/// Runtime settings resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the workout API, without a trailing slash
    pub backend_url: String,
    /// File receiving log output while the terminal UI owns the screen
    pub log_path: PathBuf,
}

impl Config {
    /// Reads settings from the process environment, after loading a `.env`
    /// file from the working directory if one exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    ///
    /// An unset or empty backend URL falls back to [`DEFAULT_BACKEND_URL`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend_url = lookup(BACKEND_URL_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        Self {
            backend_url,
            log_path: std::env::temp_dir().join(LOG_FILE_NAME),
        }
    }
}
