use serde_json::Value;
use tracing::{error, info};

use super::{helpers, parsing};
use crate::bot::PersonaBot;
use crate::core::models::ChatRequest;

/// Decodes and validates a chat request before any collaborator is built.
///
/// Returns the ready-made error response on failure: 500 when the body
/// cannot be decoded, 400 when `message` is missing or empty.
pub fn read_chat_request(payload: &Value) -> Result<ChatRequest, Value> {
    let request = parsing::request_body(payload)
        .and_then(|body| parsing::parse_chat_request(&body))
        .map_err(|e| {
            error!("Error in trump-response: {}", e);
            helpers::internal_error(&e.to_string())
        })?;

    let Some(message) = request.message() else {
        return Err(helpers::err_response(400, "Message is required"));
    };

    info!(message = %message, "Received message");
    info!(history_len = request.chat_history.len(), "Chat history length");

    Ok(request)
}

/// Runs one validated chat turn and wraps `{response, audioUrl}` in a 200.
pub async fn respond(bot: &PersonaBot, request: &ChatRequest) -> Value {
    let message = request.message().unwrap_or_default();
    let reply = bot.reply(message, &request.chat_history).await;
    helpers::ok_json(&reply)
}

/// `POST /api/trump-response`
pub async fn handle_chat(bot: &PersonaBot, payload: &Value) -> Value {
    match read_chat_request(payload) {
        Ok(request) => respond(bot, &request).await,
        Err(response) => response,
    }
}
