//! Replicate predictions API client
//!
//! Predictions are created with `Prefer: wait`, which lets Replicate hold the
//! connection until the model finishes. If the prediction is still running
//! when the server returns, its `urls.get` link is polled until it reaches a
//! terminal status or the configured timeout elapses.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use super::ModelRunner;
use crate::core::config::AppConfig;
use crate::core::models::ModelOutput;
use crate::errors::ChatError;

/// `owner/name` or `owner/name:version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRef {
    pub owner: String,
    pub name: String,
    pub version: Option<String>,
}

impl ModelRef {
    /// # Errors
    ///
    /// Returns an error if the reference is not `owner/name[:version]`.
    pub fn parse(reference: &str) -> Result<Self, ChatError> {
        let (path, version) = match reference.split_once(':') {
            Some((path, version)) => (path, Some(version.trim())),
            None => (reference, None),
        };
        let Some((owner, name)) = path.trim().split_once('/') else {
            return Err(ChatError::ConfigError(format!(
                "model reference '{reference}' must look like owner/name[:version]"
            )));
        };
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(ChatError::ConfigError(format!(
                "model reference '{reference}' must look like owner/name[:version]"
            )));
        }
        if version.is_some_and(str::is_empty) {
            return Err(ChatError::ConfigError(format!(
                "model reference '{reference}' has an empty version"
            )));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            version: version.map(ToString::to_string),
        })
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}/{}:{}", self.owner, self.name, v),
            None => write!(f, "{}/{}", self.owner, self.name),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(default)]
    id: Option<String>,
    status: String,
    #[serde(default)]
    output: Option<ModelOutput>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    urls: Option<PredictionUrls>,
}

#[derive(Debug, Deserialize)]
struct PredictionUrls {
    get: Option<String>,
}

impl Prediction {
    fn is_terminal(&self) -> bool {
        matches!(self.status.as_str(), "succeeded" | "failed" | "canceled")
    }

    fn error_message(&self) -> String {
        match &self.error {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => format!("prediction {}", self.status),
            Some(other) => other.to_string(),
        }
    }
}

pub struct ReplicateClient {
    http: Client,
    api_token: Option<String>,
    base_url: String,
    poll_interval: Duration,
    timeout: Duration,
}

impl ReplicateClient {
    #[must_use]
    pub fn new(
        http: Client,
        api_token: Option<String>,
        base_url: String,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            api_token: api_token.filter(|t| !t.is_empty()),
            base_url,
            poll_interval,
            timeout,
        }
    }

    #[must_use]
    pub fn from_config(http: Client, config: &AppConfig) -> Self {
        Self::new(
            http,
            config.replicate_api_token.clone(),
            config.replicate_api_base_url.clone(),
            config.poll_interval,
            config.prediction_timeout,
        )
    }

    fn token(&self) -> Result<&str, ChatError> {
        self.api_token
            .as_deref()
            .ok_or_else(|| ChatError::ModelError("REPLICATE_API_TOKEN is not set".to_string()))
    }

    async fn create_prediction(
        &self,
        model: &ModelRef,
        input: Value,
    ) -> Result<Prediction, ChatError> {
        let token = self.token()?;
        let (endpoint, body) = match &model.version {
            Some(version) => (
                format!("{}/predictions", self.base_url),
                json!({ "version": version, "input": input }),
            ),
            None => (
                format!(
                    "{}/models/{}/{}/predictions",
                    self.base_url, model.owner, model.name
                ),
                json!({ "input": input }),
            ),
        };

        let response = self
            .http
            .post(endpoint)
            .bearer_auth(token)
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::HttpError(format!("Replicate request failed: {e}")))?;

        Self::decode(response).await
    }

    async fn fetch_prediction(&self, url: &str) -> Result<Prediction, ChatError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(self.token()?)
            .send()
            .await
            .map_err(|e| ChatError::HttpError(format!("Replicate poll failed: {e}")))?;

        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<Prediction, ChatError> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(ChatError::ModelError(format!(
                "Replicate API error (status {status}): {error_text}"
            )));
        }

        response
            .json::<Prediction>()
            .await
            .map_err(|e| ChatError::ModelError(format!("Failed to parse Replicate response: {e}")))
    }
}

#[async_trait]
impl ModelRunner for ReplicateClient {
    async fn run(&self, model: &ModelRef, input: Value) -> Result<Option<ModelOutput>, ChatError> {
        let started = Instant::now();
        let mut prediction = self.create_prediction(model, input).await?;
        info!(
            model = %model,
            prediction_id = prediction.id.as_deref().unwrap_or(""),
            status = %prediction.status,
            "Created prediction"
        );

        while !prediction.is_terminal() {
            if started.elapsed() >= self.timeout {
                return Err(ChatError::ModelError(format!(
                    "prediction for {model} did not finish within {}s",
                    self.timeout.as_secs()
                )));
            }
            let Some(get_url) = prediction.urls.as_ref().and_then(|u| u.get.clone()) else {
                return Err(ChatError::ModelError(format!(
                    "prediction for {model} is {} and has no poll URL",
                    prediction.status
                )));
            };

            tokio::time::sleep(self.poll_interval).await;
            prediction = self.fetch_prediction(&get_url).await?;
            debug!(model = %model, status = %prediction.status, "Polled prediction");
        }

        if prediction.status != "succeeded" {
            return Err(ChatError::ModelError(format!(
                "{model}: {}",
                prediction.error_message()
            )));
        }

        Ok(prediction.output)
    }
}
