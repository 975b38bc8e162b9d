use std::env;
use std::time::Duration;
use url::Url;

use super::persona::{Persona, non_empty_var};

pub const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_REPLICATE_API_BASE_URL: &str = "https://api.replicate.com/v1";
pub const DEFAULT_TEXT_MODEL: &str = "meta/meta-llama-3.1-8b-instruct";
pub const DEFAULT_VOICE_MODEL: &str =
    "afiaka87/tortoise-tts:e965838de46580210694f81ede74e91f010d34a310e12a8e25e242797181f7ea";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub news_api_key: Option<String>,
    pub news_api_base_url: String,
    pub news_country: String,
    pub news_page_size: usize,
    pub replicate_api_token: Option<String>,
    pub replicate_api_base_url: String,
    pub text_model: String,
    pub voice_model: String,
    pub poll_interval: Duration,
    pub prediction_timeout: Duration,
    pub persona: Persona,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            news_api_key: non_empty_var("NEWS_API_KEY"),
            news_api_base_url: url_var("NEWS_API_BASE_URL", DEFAULT_NEWS_API_BASE_URL)?,
            news_country: non_empty_var("NEWS_COUNTRY").unwrap_or_else(|| "us".to_string()),
            news_page_size: parsed_var("NEWS_PAGE_SIZE", 5)?,
            replicate_api_token: non_empty_var("REPLICATE_API_TOKEN"),
            replicate_api_base_url: url_var(
                "REPLICATE_API_BASE_URL",
                DEFAULT_REPLICATE_API_BASE_URL,
            )?,
            text_model: non_empty_var("TEXT_MODEL")
                .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            voice_model: non_empty_var("VOICE_MODEL")
                .unwrap_or_else(|| DEFAULT_VOICE_MODEL.to_string()),
            poll_interval: Duration::from_millis(positive_var(
                "REPLICATE_POLL_INTERVAL_MS",
                500,
            )?),
            prediction_timeout: Duration::from_secs(parsed_var("REPLICATE_TIMEOUT_SECS", 120)?),
            persona: Persona::from_env()?,
        })
    }

    #[must_use]
    pub fn has_replicate_token(&self) -> bool {
        self.replicate_api_token.is_some()
    }
}

fn url_var(key: &str, default: &str) -> Result<String, String> {
    let raw = non_empty_var(key).unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|e| format!("{}: {}", key, e))?;
    Ok(raw.trim_end_matches('/').to_string())
}

fn positive_var(key: &str, default: u64) -> Result<u64, String> {
    match parsed_var(key, default)? {
        0 => Err(format!("{}: must be greater than zero", key)),
        value => Ok(value),
    }
}

fn parsed_var<T>(key: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| format!("{}: {}", key, e)),
        _ => Ok(default),
    }
}
