use serde_json::{Value, json};
use tracing::{error, info};

use crate::clients::{ModelRef, ModelRunner};
use crate::core::models::{HistoryEntry, NewsItem};
use crate::core::persona::Persona;
use crate::errors::ChatError;
use crate::prompt::{
    MAX_NEW_TOKENS, REPETITION_PENALTY, TEMPERATURE, TOP_P, build_prompt, sanitize_response,
};

/// Input payload for the text-generation model.
#[must_use]
pub fn generation_input(prompt: &str) -> Value {
    json!({
        "prompt": prompt,
        "max_new_tokens": MAX_NEW_TOKENS,
        "temperature": TEMPERATURE,
        "top_p": TOP_P,
        "repetition_penalty": REPETITION_PENALTY
    })
}

/// Generates the persona reply, falling back to the persona's fallback
/// sentence on any model failure.
pub async fn generate_response(
    runner: &dyn ModelRunner,
    model: &ModelRef,
    persona: &Persona,
    message: &str,
    news: &[NewsItem],
    history: &[HistoryEntry],
) -> String {
    match try_generate(runner, model, persona, message, news, history).await {
        Ok(text) => {
            info!(response = %text, "Generated response");
            text
        }
        Err(e) => {
            error!("Error generating response: {}", e);
            persona.fallback.clone()
        }
    }
}

async fn try_generate(
    runner: &dyn ModelRunner,
    model: &ModelRef,
    persona: &Persona,
    message: &str,
    news: &[NewsItem],
    history: &[HistoryEntry],
) -> Result<String, ChatError> {
    let prompt = build_prompt(persona, message, news, history);

    #[cfg(feature = "debug-logs")]
    tracing::debug!("Using prompt:\n{}", prompt);

    let output = runner
        .run(model, generation_input(&prompt))
        .await?
        .ok_or_else(|| ChatError::ModelError(format!("{model} returned no output")))?;

    Ok(sanitize_response(persona, &output.joined()))
}
