//! API Lambda handler - thin router that delegates to the endpoint modules.
//!
//! This module handles:
//! - Path and method routing
//! - Request-scoped config and bot construction
//! - Health checks (delegated to `health`)
//! - Chat turns (delegated to `chat`)

use super::{chat, health, helpers, parsing};
use crate::bot::PersonaBot;
use crate::core::config::AppConfig;
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

pub use self::function_handler as handler;

pub const HEALTH_PATH: &str = "/api/health";
pub const CHAT_PATH: &str = "/api/trump-response";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Health,
    Chat,
    MethodNotAllowed,
    NotFound,
}

/// Maps a request path and method onto an endpoint.
#[must_use]
pub fn resolve_route(path: Option<&str>, method: &str) -> Route {
    let path = path.unwrap_or("").trim_end_matches('/');
    if path.ends_with(HEALTH_PATH) {
        Route::Health
    } else if path.ends_with(CHAT_PATH) {
        if method == "POST" {
            Route::Chat
        } else {
            Route::MethodNotAllowed
        }
    } else {
        Route::NotFound
    }
}

/// Lambda handler for the API entrypoint.
///
/// The health route answers without touching configuration. The chat route
/// validates the body, then builds its config and bot per request.
///
/// # Errors
///
/// Never returns `Err`; every failure is turned into a JSON error response.
#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<impl Serialize, Error> {
    let payload = event.payload;
    let path = parsing::request_path(&payload);
    let method = parsing::request_method(&payload);
    info!(path = path.unwrap_or(""), method = %method, "API Lambda received request");

    if let Some(response) = respond_without_bot(resolve_route(path, &method)) {
        return Ok(response);
    }

    let span = info_span!("chat", request_id = %Uuid::new_v4());
    Ok(chat_from_env(&payload).instrument(span).await)
}

/// Validates the request first, then builds config and bot for it.
async fn chat_from_env(payload: &Value) -> Value {
    let request = match chat::read_chat_request(payload) {
        Ok(r) => r,
        Err(response) => return response,
    };

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Config error: {}", e);
            return helpers::internal_error(&e);
        }
    };
    let bot = match PersonaBot::new(&config) {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {}", e);
            return helpers::internal_error(&e.to_string());
        }
    };

    chat::respond(&bot, &request).await
}

/// Dispatches an API Gateway event against an existing bot.
pub async fn route(bot: &PersonaBot, payload: &Value) -> Value {
    let path = parsing::request_path(payload);
    let method = parsing::request_method(payload);

    if let Some(response) = respond_without_bot(resolve_route(path, &method)) {
        return response;
    }

    let span = info_span!("chat", request_id = %Uuid::new_v4());
    chat::handle_chat(bot, payload).instrument(span).await
}

fn respond_without_bot(route: Route) -> Option<Value> {
    match route {
        Route::Health => Some(health::handle_health()),
        Route::MethodNotAllowed => Some(helpers::err_response(405, "Method not allowed")),
        Route::NotFound => Some(helpers::err_response(404, "Not found")),
        Route::Chat => None,
    }
}
