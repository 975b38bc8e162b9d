//! The persona bot: news, then text, then voice, strictly in sequence.

use reqwest::Client;
use std::sync::Arc;
use tracing::info;

use crate::clients::{ModelRef, ModelRunner, NewsClient, NewsSource, ReplicateClient};
use crate::core::config::AppConfig;
use crate::core::models::{ChatResponse, HistoryEntry};
use crate::core::persona::Persona;
use crate::errors::ChatError;
use crate::features::{news, respond, voice};

pub struct PersonaBot {
    news: Arc<dyn NewsSource>,
    runner: Arc<dyn ModelRunner>,
    text_model: ModelRef,
    voice_model: ModelRef,
    persona: Persona,
}

impl PersonaBot {
    /// Builds a bot backed by newsapi.org and Replicate.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or a model
    /// reference in the config is malformed.
    pub fn new(config: &AppConfig) -> Result<Self, ChatError> {
        info!(
            has_replicate_token = config.has_replicate_token(),
            token_length = config.replicate_api_token.as_ref().map_or(0, String::len),
            has_news_key = config.news_api_key.is_some(),
            "Environment variables"
        );

        let http = Client::builder()
            .build()
            .map_err(|e| ChatError::HttpError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_clients(
            Arc::new(NewsClient::from_config(http.clone(), config)),
            Arc::new(ReplicateClient::from_config(http, config)),
            ModelRef::parse(&config.text_model)?,
            ModelRef::parse(&config.voice_model)?,
            config.persona.clone(),
        ))
    }

    /// Builds a bot over arbitrary collaborators.
    #[must_use]
    pub fn with_clients(
        news: Arc<dyn NewsSource>,
        runner: Arc<dyn ModelRunner>,
        text_model: ModelRef,
        voice_model: ModelRef,
        persona: Persona,
    ) -> Self {
        Self {
            news,
            runner,
            text_model,
            voice_model,
            persona,
        }
    }

    #[must_use]
    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Produces the reply text and audio URL for one chat turn.
    ///
    /// Each stage degrades on its own, so this never fails.
    pub async fn reply(&self, message: &str, history: &[HistoryEntry]) -> ChatResponse {
        let recent_news = news::fetch_recent_news(self.news.as_ref()).await;

        let response = respond::generate_response(
            self.runner.as_ref(),
            &self.text_model,
            &self.persona,
            message,
            &recent_news,
            history,
        )
        .await;

        let audio_url = voice::synthesize_voice(
            self.runner.as_ref(),
            &self.voice_model,
            &self.persona,
            &response,
        )
        .await;

        ChatResponse {
            response,
            audio_url,
        }
    }
}
