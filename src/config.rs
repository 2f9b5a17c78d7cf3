//! Service configuration derived from environment variables.

use std::env;

/// Runtime environment name, used to pick log formatting.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Alpha Vantage key for stock candles. Synthetic candles when absent.
    pub alpha_vantage_api_key: Option<String>,
    /// Twelve Data key for gold candles. Synthetic candles when absent.
    pub twelve_data_api_key: Option<String>,
    /// AI provider selector: `stub`, `gemini` or `deepseek`.
    pub ai_provider: String,
    pub ai_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub deepseek_base_url: String,
    pub deepseek_model: String,
    pub ai_timeout_ms: u64,
    pub ai_max_tokens: u32,
    pub symbol_cache_capacity: usize,
    pub symbol_cache_ttl_secs: u64,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_opt(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", 3000),
            alpha_vantage_api_key: env_opt("ALPHAVANTAGE_API_KEY"),
            twelve_data_api_key: env_opt("TWELVEDATA_API_KEY"),
            ai_provider: env_str("AI_PROVIDER", "stub").to_lowercase(),
            ai_api_key: env_opt("AI_API_KEY"),
            gemini_base_url: env_str(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com/v1beta",
            ),
            gemini_model: env_str("GEMINI_MODEL", "gemini-2.0-flash"),
            deepseek_base_url: env_str("DEEPSEEK_BASE_URL", "https://api.deepseek.com"),
            deepseek_model: env_str("DEEPSEEK_MODEL", "deepseek-chat"),
            ai_timeout_ms: env_parse("AI_TIMEOUT_MS", 45_000),
            ai_max_tokens: env_parse("AI_MAX_TOKENS", 600),
            symbol_cache_capacity: env_parse("SYMBOL_CACHE_CAPACITY", 256),
            symbol_cache_ttl_secs: env_parse("SYMBOL_CACHE_TTL_SECS", 6 * 3600),
        }
    }
}
