#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use talking_trump::PersonaBot;
use talking_trump::clients::{ModelRef, ModelRunner, NewsSource};
use talking_trump::core::models::{ModelOutput, NewsItem};
use talking_trump::core::persona::{
    DEFAULT_ALIASES, DEFAULT_FALLBACK, DEFAULT_NAME, DEFAULT_TEMPLATE, Persona,
};
use talking_trump::errors::ChatError;

pub const TEXT_MODEL: &str = "meta/meta-llama-3.1-8b-instruct";
pub const VOICE_MODEL: &str = "afiaka87/tortoise-tts:abc123";
pub const VOICE_SAMPLE: &str = "https://cdn.example.com/voice.wav";

pub struct FakeNews {
    pub configured: bool,
    pub result: Result<Vec<NewsItem>, String>,
    pub calls: AtomicUsize,
}

impl FakeNews {
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            result: Ok(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_items(items: Vec<NewsItem>) -> Self {
        Self {
            configured: true,
            result: Ok(items),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            configured: true,
            result: Err("connection refused".to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsSource for FakeNews {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn top_headlines(&self) -> Result<Vec<NewsItem>, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map_err(ChatError::NewsError)
    }
}

pub type Reply = Result<Option<ModelOutput>, String>;

/// Answers text and voice models with canned replies and records every call.
pub struct FakeRunner {
    pub text_reply: Reply,
    pub voice_reply: Reply,
    pub calls: Mutex<Vec<(String, Value)>>,
}

impl FakeRunner {
    pub fn new(text_reply: Reply, voice_reply: Reply) -> Self {
        Self {
            text_reply,
            voice_reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelRunner for FakeRunner {
    async fn run(&self, model: &ModelRef, input: Value) -> Result<Option<ModelOutput>, ChatError> {
        self.calls.lock().unwrap().push((model.to_string(), input));
        let reply = if model.version.is_some() {
            &self.voice_reply
        } else {
            &self.text_reply
        };
        reply.clone().map_err(ChatError::ModelError)
    }
}

pub fn persona() -> Persona {
    Persona::new(
        DEFAULT_NAME,
        &DEFAULT_ALIASES,
        DEFAULT_TEMPLATE,
        DEFAULT_FALLBACK,
        Some(VOICE_SAMPLE.to_string()),
    )
    .unwrap()
}

pub fn test_bot(news: Arc<FakeNews>, runner: Arc<FakeRunner>) -> PersonaBot {
    PersonaBot::with_clients(
        news,
        runner,
        ModelRef::parse(TEXT_MODEL).unwrap(),
        ModelRef::parse(VOICE_MODEL).unwrap(),
        persona(),
    )
}

pub fn text(s: &str) -> Reply {
    Ok(Some(ModelOutput::Single(s.to_string())))
}

pub fn fragments(parts: &[&str]) -> Reply {
    Ok(Some(ModelOutput::Multiple(parts.iter().map(|p| (*p).to_string()).collect())))
}

pub fn post_event(body: &str) -> Value {
    serde_json::json!({
        "rawPath": "/api/trump-response",
        "requestContext": { "http": { "method": "POST" } },
        "body": body,
        "isBase64Encoded": false
    })
}

/// Status code and decoded JSON body of a proxy response.
pub fn unpack(response: &Value) -> (u64, Value) {
    let status = response["statusCode"].as_u64().unwrap();
    let body: Value = serde_json::from_str(response["body"].as_str().unwrap()).unwrap();
    (status, body)
}
