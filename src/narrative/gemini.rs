use crate::error::{Error, Result};
use crate::metrics;
use crate::narrative::{NarrativeContext, NarrativeGenerator};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-pro";
const SOURCE: &str = "gemini";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Prophecy {
    prophecy: Option<String>,
}

fn format_volume(volume: f64) -> String {
    if volume >= 1e9 {
        format!("{:.2}B", volume / 1e9)
    } else if volume >= 1e6 {
        format!("{:.2}M", volume / 1e6)
    } else if volume >= 1e3 {
        format!("{:.2}K", volume / 1e3)
    } else {
        format!("{:.2}", volume)
    }
}

pub fn build_prompt(context: &NarrativeContext) -> String {
    format!(
        "You are a sarcastic, all-knowing crypto oracle speaking from the future.\n\
         \n\
         The analysis is already done:\n\
         - Ticker: {}\n\
         - Name: {}\n\
         - Sector: {}\n\
         - Current Price: ${}\n\
         - 24h Volume: ${}\n\
         - 24h Change: {:.2}%\n\
         - RSI (14): {:.1}\n\
         - Bollinger Position: {:.0}%\n\
         - Outlook: {}\n\
         - Confidence: {}%\n\
         \n\
         Do not change the outlook. Write a short, witty 1-2 sentence prophecy consistent with it.\n\
         Respond with ONLY a JSON object (no markdown, no code blocks):\n\
         {{\"prophecy\": \"...\"}}",
        context.ticker,
        context.name,
        context.category,
        context.price,
        format_volume(context.volume_24h),
        context.price_change_24h,
        context.rsi,
        context.percent_b * 100.0,
        context.outlook.as_str(),
        context.confidence,
    )
}

/// The `prophecy` field of the first `{...}` span in `text`, or the trimmed
/// text when there is no parseable object.
pub fn extract_prophecy(text: &str) -> Option<String> {
    let object = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => Some(&text[start..=end]),
        _ => None,
    };

    let parsed = object
        .and_then(|json| serde_json::from_str::<Prophecy>(json).ok())
        .and_then(|p| p.prophecy)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    parsed.or_else(|| {
        let trimmed = text.trim();
        (!trimmed.is_empty() && object.is_none()).then(|| trimmed.to_string())
    })
}

/// Prose from Google's Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiNarrator {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiNarrator {
    pub fn new(api_key: String, base_url: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to create Gemini HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| API_BASE_URL.to_string()),
        })
    }
}

#[async_trait]
impl NarrativeGenerator for GeminiNarrator {
    async fn generate(&self, context: &NarrativeContext) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, MODEL);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(context),
                }],
            }],
        };

        metrics::UPSTREAM_CALLS.with_label_values(&[SOURCE]).inc();
        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                metrics::UPSTREAM_FAILURES.with_label_values(&[SOURCE]).inc();
                Error::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            metrics::UPSTREAM_FAILURES.with_label_values(&[SOURCE]).inc();
            warn!("Gemini responded with status {}", status);
            return Err(match status.as_u16() {
                401 | 403 => Error::ApiAuthFailed("Gemini rejected the API key".to_string()),
                429 => Error::RateLimitExceeded("Gemini rate limit exceeded".to_string()),
                _ => Error::ApiError(format!("Gemini request failed with status: {}", status)),
            });
        }

        let response: GenerateResponse = response.json().await.map_err(|e| {
            metrics::UPSTREAM_FAILURES.with_label_values(&[SOURCE]).inc();
            Error::ApiInvalidFormat(format!("Gemini returned an unparseable body: {}", e))
        })?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();
        debug!("Gemini raw reply for {}: {}", context.ticker, text);

        extract_prophecy(&text)
            .ok_or_else(|| Error::ApiInvalidData("Gemini reply contained no prophecy".to_string()))
    }
}
