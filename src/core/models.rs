use serde::{Deserialize, Serialize};

/// Body of `POST /api/trump-response`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub chat_history: Vec<HistoryEntry>,
}

impl ChatRequest {
    /// The user message, if present and non-empty.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub sender: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub audio_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthPayload {
    pub status: &'static str,
    pub timestamp: String,
}

/// Hosted models answer with either one string or a list of fragments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ModelOutput {
    Single(String),
    Multiple(Vec<String>),
}

impl ModelOutput {
    /// Fragments concatenated in order.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            ModelOutput::Single(s) => s.clone(),
            ModelOutput::Multiple(parts) => parts.concat(),
        }
    }

    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            ModelOutput::Single(s) => Some(s.as_str()),
            ModelOutput::Multiple(parts) => parts.first().map(String::as_str),
        }
    }
}

/// Accepts any JSON scalar: strings as-is, `null` as empty, others as their JSON text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<HistoryEntry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<HistoryEntry>>::deserialize(deserializer)?.unwrap_or_default())
}
