use anyhow::{Context, Result};

const DEFAULT_MODEL: &str = "gpt-4o-mini-2024-07-18";
const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub llm_model: String,
    pub llm_api_url: String,
    pub llm_timeout_secs: u64,
    /// Max in-flight LLM calls per report. 1 keeps report generation sequential.
    pub report_concurrency: usize,
    /// Prior exchanges replayed to the model in free-form chat.
    pub chat_memory_window: usize,
    pub max_upload_bytes: usize,
    /// Sessions with no activity for this long are dropped.
    pub session_idle_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let report_concurrency: usize = parse_env("REPORT_CONCURRENCY", 1)?;

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            llm_api_url: std::env::var("LLM_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            report_concurrency: report_concurrency.max(1),
            chat_memory_window: parse_env("CHAT_MEMORY_WINDOW", 5)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            session_idle_ttl_secs: parse_env("SESSION_IDLE_TTL_SECS", 3600)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
