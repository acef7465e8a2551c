use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Only the numeric/typed settings are validated at startup. `GEMINI_API_KEY` is optional:
/// without it every LLM-backed feature serves its fallback record.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub gemini_max_tokens: u32,
    pub gemini_temperature: f32,
    pub gemini_timeout_secs: u64,
    /// Resumes longer than this are summarised before the insight pass.
    pub chunk_size: usize,
    pub dataset_dir: String,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
    /// Sessions idle for longer than this are evicted.
    pub session_idle_ttl_secs: u64,
    pub session_sweep_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            gemini_max_tokens: 8192,
            gemini_temperature: 0.7,
            gemini_timeout_secs: 120,
            chunk_size: 30_000,
            dataset_dir: "data".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            port: 8080,
            rust_log: "info".to_string(),
            session_idle_ttl_secs: 3600,
            session_sweep_interval_secs: 60,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_api_base: optional_env("GEMINI_API_BASE").unwrap_or(defaults.gemini_api_base),
            gemini_max_tokens: parse_env("GEMINI_MAX_TOKENS", defaults.gemini_max_tokens)?,
            gemini_temperature: parse_env("GEMINI_TEMPERATURE", defaults.gemini_temperature)?,
            gemini_timeout_secs: parse_env("GEMINI_TIMEOUT_SECS", defaults.gemini_timeout_secs)?,
            chunk_size: parse_env("GEMINI_CHUNK_SIZE", defaults.chunk_size)?,
            dataset_dir: optional_env("DATASET_DIR").unwrap_or(defaults.dataset_dir),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            port: parse_env("PORT", defaults.port)?,
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            session_idle_ttl_secs: parse_env(
                "SESSION_IDLE_TTL_SECS",
                defaults.session_idle_ttl_secs,
            )?,
            session_sweep_interval_secs: parse_env(
                "SESSION_SWEEP_INTERVAL_SECS",
                defaults.session_sweep_interval_secs,
            )?,
        })
    }
}

/// Reads a variable, treating blank values the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}
