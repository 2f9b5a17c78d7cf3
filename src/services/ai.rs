//! AI commentary providers.
//!
//! The AI layer receives a reduced projection of the computed state (latest
//! indicator snapshot plus rule result, never full series) and returns
//! JSON-shaped free-text commentary. It has no influence on the computed
//! values themselves.

use crate::config::Config;
use crate::models::candle::{AssetClass, Interval};
use crate::models::indicators::LatestSnapshot;
use crate::models::indicators::TrendDirection;
use crate::models::rules::{RiskLevel, RuleResult};
use crate::services::market_data::ProviderError;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Reduced projection forwarded to the model provider.
#[derive(Debug, Clone, Serialize)]
pub struct AiInput {
    pub symbol: String,
    #[serde(rename = "assetClass")]
    pub asset_class: AssetClass,
    pub interval: Interval,
    pub indicators: AiIndicators,
    pub rules: RuleResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct AiIndicators {
    pub latest: LatestSnapshot,
}

impl AiInput {
    pub fn new(
        symbol: &str,
        asset_class: AssetClass,
        interval: Interval,
        latest: LatestSnapshot,
        rules: RuleResult,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            asset_class,
            interval,
            indicators: AiIndicators { latest },
            rules,
        }
    }
}

#[async_trait]
pub trait AiProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Produce commentary for the summarized market state. The returned
    /// value is passed through to the HTTP response as-is.
    async fn analyze(&self, input: &AiInput) -> Result<Value, ProviderError>;
}

const SYSTEM_PROMPT: &str = "You are a senior quantitative trader reading market \
structure from multi-timeframe moving averages and volume/price behavior. \
Treat the daily series as the longer-term background and 1h as intraday rhythm; \
an upward cross below the daily MA60 is a rebound, not a reversal. Flag missing \
volume expansion on breakouts as a trap risk. Output JSON only, never predict \
future prices and never give trade advice. Required fields: long_term_trend, \
short_term_bias, overall_view, execution_logic, risk_level, overall, forces, \
timeframes, risk, rationale, action_hint. risk_level must be low/medium/high and \
action_hint must be wait/watch/cautious. Describe only the 1h and 1day \
timeframes, and rewrite internal field names into natural language.";

/// Deterministic fallback used when no AI provider is configured.
pub struct StubAiProvider;

#[async_trait]
impl AiProvider for StubAiProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn analyze(&self, input: &AiInput) -> Result<Value, ProviderError> {
        let rules = &input.rules;
        let overall = match rules.trend {
            TrendDirection::Up | TrendDirection::Down => "trend",
            _ => "range",
        };
        let (action_hint, risk_level) = match rules.risk_level {
            RiskLevel::High => ("wait", "high"),
            RiskLevel::Medium => ("watch", "medium"),
            RiskLevel::Low => ("watch", "low"),
        };

        Ok(json!({
            "overall": overall,
            "forces": "Buying and selling pressure have diverged on the current timeframe; wait for confirmation.",
            "timeframes": {
                "1h": "A single timeframe carries limited information; read it against the daily background.",
                "1day": "The longer-term background is not yet settled; wait for the structure to confirm."
            },
            "risk": "The structure has not produced a consistent signal; timeframe mismatch risk remains.",
            "rationale": "Observation is preferable to action while the structure is unconfirmed.",
            "action_hint": action_hint,
            "short_term_bias": "Short-term direction is unclear; lean on structure over momentum.",
            "long_term_trend": "No long-term consensus yet; watch the moving-average structure.",
            "overall_view": "Short- and long-term signals do not yet agree; stay observational.",
            "execution_logic": "Wait and observe; avoid acting before the structure confirms.",
            "risk_level": risk_level,
        }))
    }
}

/// Google Gemini `generateContent` provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl GeminiProvider {
    pub fn new(base_url: String, api_key: String, model: String, max_tokens: u32, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url,
            api_key,
            model,
            max_tokens,
        }
    }

    fn request_body(&self, input: &AiInput) -> Value {
        json!({
            "contents": [{
                "parts": [{
                    "text": format!("{SYSTEM_PROMPT}\nInput data:\n{}",
                        serde_json::to_string(input).unwrap_or_default())
                }]
            }],
            "generationConfig": {
                "temperature": 0.2,
                "maxOutputTokens": self.max_tokens,
            }
        })
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn analyze(&self, input: &AiInput) -> Result<Value, ProviderError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = self.request_body(input);

        let request = || async {
            let response = self
                .client
                .post(&url)
                .header("X-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?
                .error_for_status()?;
            Ok::<Value, ProviderError>(response.json().await?)
        };
        let data = request
            .retry(ExponentialBuilder::default().with_max_times(1))
            .await?;

        let text = data
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .unwrap_or_default();
        parse_commentary(text, false)
    }
}

/// DeepSeek chat-completions provider.
pub struct DeepSeekProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl DeepSeekProvider {
    pub fn new(base_url: String, api_key: String, model: String, max_tokens: u32, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url,
            api_key,
            model,
            max_tokens,
        }
    }
}

#[async_trait]
impl AiProvider for DeepSeekProvider {
    fn name(&self) -> &'static str {
        "deepseek"
    }

    async fn analyze(&self, input: &AiInput) -> Result<Value, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": serde_json::to_string(input).unwrap_or_default() },
            ],
            "temperature": 0.2,
            "max_tokens": self.max_tokens,
        });

        let request = || async {
            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await?
                .error_for_status()?;
            Ok::<Value, ProviderError>(response.json().await?)
        };
        let data = request
            .retry(ExponentialBuilder::default().with_max_times(1))
            .await?;

        let text = data
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default();
        // Chat models occasionally wrap the JSON in prose.
        parse_commentary(text, true)
    }
}

fn parse_commentary(text: &str, extract_block: bool) -> Result<Value, ProviderError> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }
    if extract_block {
        if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
            if start < end {
                if let Ok(value) = serde_json::from_str(&text[start..=end]) {
                    return Ok(value);
                }
            }
        }
    }
    Err(ProviderError::BadPayload(
        "AI response is not valid JSON".to_string(),
    ))
}

/// Build the configured AI provider; unknown selectors fall back to stub.
pub fn provider_from_config(config: &Config) -> Arc<dyn AiProvider> {
    let timeout = Duration::from_millis(config.ai_timeout_ms);
    match (config.ai_provider.as_str(), &config.ai_api_key) {
        ("gemini", Some(key)) => Arc::new(GeminiProvider::new(
            config.gemini_base_url.clone(),
            key.clone(),
            config.gemini_model.clone(),
            config.ai_max_tokens,
            timeout,
        )),
        ("deepseek", Some(key)) => Arc::new(DeepSeekProvider::new(
            config.deepseek_base_url.clone(),
            key.clone(),
            config.deepseek_model.clone(),
            config.ai_max_tokens,
            timeout,
        )),
        _ => Arc::new(StubAiProvider),
    }
}
