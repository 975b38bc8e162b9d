//! Environment-driven configuration and the full Lambda handler.
//!
//! Every case that touches the process environment lives in one test so
//! they cannot race each other.

use lambda_runtime::{Context, LambdaEvent};
use serde_json::{Value, json};
use std::time::Duration;

use talking_trump::api::handler::function_handler;
use talking_trump::core::config::{
    AppConfig, DEFAULT_NEWS_API_BASE_URL, DEFAULT_REPLICATE_API_BASE_URL, DEFAULT_TEXT_MODEL,
    DEFAULT_VOICE_MODEL,
};
use talking_trump::core::persona::{DEFAULT_FALLBACK, DEFAULT_NAME, Persona};

const VARS: [&str; 15] = [
    "NEWS_API_KEY",
    "NEWS_API_BASE_URL",
    "NEWS_COUNTRY",
    "NEWS_PAGE_SIZE",
    "REPLICATE_API_TOKEN",
    "REPLICATE_API_BASE_URL",
    "TEXT_MODEL",
    "VOICE_MODEL",
    "REPLICATE_POLL_INTERVAL_MS",
    "REPLICATE_TIMEOUT_SECS",
    "PERSONA_NAME",
    "PERSONA_ALIASES",
    "PERSONA_TEMPLATE",
    "PERSONA_FALLBACK",
    "VOICE_SAMPLE_URL",
];

fn clear_env() {
    for key in VARS {
        // SAFETY: only this test in this binary touches the environment
        unsafe { std::env::remove_var(key) };
    }
}

fn set(key: &str, value: &str) {
    // SAFETY: only this test in this binary touches the environment
    unsafe { std::env::set_var(key, value) };
}

fn config_err() -> String {
    AppConfig::from_env().unwrap_err()
}

async fn invoke(payload: Value) -> (u64, Value) {
    let response = function_handler(LambdaEvent::new(payload, Context::default()))
        .await
        .unwrap();
    let response = serde_json::to_value(response).unwrap();
    let status = response["statusCode"].as_u64().unwrap();
    let body: Value = serde_json::from_str(response["body"].as_str().unwrap()).unwrap();
    (status, body)
}

fn chat_event(body: &str) -> Value {
    json!({
        "rawPath": "/api/trump-response",
        "requestContext": { "http": { "method": "POST" } },
        "body": body,
        "isBase64Encoded": false
    })
}

#[tokio::test]
async fn test_config_from_env_and_handler() {
    // Defaults
    clear_env();
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.news_api_key, None);
    assert_eq!(config.news_api_base_url, DEFAULT_NEWS_API_BASE_URL);
    assert_eq!(config.news_country, "us");
    assert_eq!(config.news_page_size, 5);
    assert_eq!(config.replicate_api_token, None);
    assert!(!config.has_replicate_token());
    assert_eq!(config.replicate_api_base_url, DEFAULT_REPLICATE_API_BASE_URL);
    assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
    assert_eq!(config.voice_model, DEFAULT_VOICE_MODEL);
    assert_eq!(config.poll_interval, Duration::from_millis(500));
    assert_eq!(config.prediction_timeout, Duration::from_secs(120));
    assert_eq!(config.persona.name, DEFAULT_NAME);
    assert_eq!(config.persona.aliases, ["Donald Trump", "Trump"]);
    assert_eq!(config.persona.fallback, DEFAULT_FALLBACK);
    assert_eq!(config.persona.voice_sample_url, None);

    // Blank credentials count as absent, others are trimmed
    set("NEWS_API_KEY", "");
    set("REPLICATE_API_TOKEN", "   ");
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.news_api_key, None);
    assert_eq!(config.replicate_api_token, None);
    set("NEWS_API_KEY", " abc123 ");
    set("REPLICATE_API_TOKEN", "r8_xyz");
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.news_api_key.as_deref(), Some("abc123"));
    assert!(config.has_replicate_token());

    // URLs are validated and lose their trailing slash
    set("NEWS_API_BASE_URL", "http://localhost:9000/v2/");
    assert_eq!(
        AppConfig::from_env().unwrap().news_api_base_url,
        "http://localhost:9000/v2"
    );
    set("NEWS_API_BASE_URL", "not a url");
    assert!(config_err().starts_with("NEWS_API_BASE_URL:"));
    clear_env();
    set("REPLICATE_API_BASE_URL", "::");
    assert!(config_err().starts_with("REPLICATE_API_BASE_URL:"));

    // Numeric settings
    clear_env();
    set("NEWS_PAGE_SIZE", "3");
    set("REPLICATE_POLL_INTERVAL_MS", "250");
    set("REPLICATE_TIMEOUT_SECS", "30");
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.news_page_size, 3);
    assert_eq!(config.poll_interval, Duration::from_millis(250));
    assert_eq!(config.prediction_timeout, Duration::from_secs(30));
    set("NEWS_PAGE_SIZE", "five");
    assert!(config_err().starts_with("NEWS_PAGE_SIZE:"));
    clear_env();
    set("REPLICATE_POLL_INTERVAL_MS", "0");
    assert_eq!(
        config_err(),
        "REPLICATE_POLL_INTERVAL_MS: must be greater than zero"
    );
    set("REPLICATE_POLL_INTERVAL_MS", "-5");
    assert!(config_err().starts_with("REPLICATE_POLL_INTERVAL_MS:"));

    // Persona overrides
    clear_env();
    set("PERSONA_NAME", "Captain Nemo");
    set("PERSONA_ALIASES", "Nemo, Captain Nemo,,");
    set("PERSONA_TEMPLATE", "Speak like a sailor. {history} {news}");
    set("PERSONA_FALLBACK", "The sea is quiet.");
    set("VOICE_SAMPLE_URL", "https://cdn.example.com/nemo.wav");
    let persona = Persona::from_env().unwrap();
    assert_eq!(persona.name, "Captain Nemo");
    assert_eq!(persona.aliases, ["Captain Nemo", "Nemo"]);
    assert_eq!(persona.cue(), "Nemo:");
    assert_eq!(persona.template, "Speak like a sailor. {history} {news}");
    assert_eq!(persona.fallback, "The sea is quiet.");
    assert_eq!(
        persona.voice_sample_url.as_deref(),
        Some("https://cdn.example.com/nemo.wav")
    );
    assert_eq!(persona.strip_label("captain nemo: Dive!"), "Dive!");

    set("PERSONA_ALIASES", " , ,");
    assert!(Persona::from_env().is_err());
    assert!(config_err().contains("alias"));

    set("PERSONA_ALIASES", "Nemo");
    set("VOICE_SAMPLE_URL", "nemo.wav");
    assert!(Persona::from_env().unwrap_err().starts_with("VOICE_SAMPLE_URL:"));

    // Health needs no configuration at all
    clear_env();
    set("NEWS_PAGE_SIZE", "five");
    let (status, body) = invoke(json!({
        "rawPath": "/api/health",
        "requestContext": { "http": { "method": "GET" } }
    }))
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");

    // A missing message is rejected before configuration is read
    for request in [r#"{}"#, r#"{"message": ""}"#, r#"{"message": null}"#] {
        let (status, body) = invoke(chat_event(request)).await;
        assert_eq!(status, 400, "body {request}");
        assert_eq!(body, json!({ "error": "Message is required" }));
    }

    // A valid message under broken configuration is an internal error
    let (status, body) = invoke(chat_event(r#"{"message": "hi"}"#)).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"].as_str().unwrap().starts_with("NEWS_PAGE_SIZE:"));

    // With no credentials every stage degrades without touching the network
    clear_env();
    let (status, body) = invoke(chat_event(r#"{"message": "What about the economy?"}"#)).await;
    assert_eq!(status, 200);
    assert_eq!(body["response"], DEFAULT_FALLBACK);
    assert!(body["audioUrl"].is_null());

    clear_env();
}
