//! Talking Trump - a serverless persona chat endpoint.
//!
//! A single AWS Lambda function serves two routes:
//! 1. `GET /api/health` for liveness checks
//! 2. `POST /api/trump-response`, which fetches recent headlines, asks a hosted
//!    text-generation model for an in-character reply, and has a hosted
//!    text-to-speech model read the reply aloud
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution
//! - newsapi.org for headline context
//! - Replicate for text generation and speech synthesis
//! - Tokio for async runtime
//!
//! Each request is handled independently: news, text and voice run strictly
//! one after the other, and every stage has its own fallback so upstream
//! outages degrade the reply instead of failing the request.
//!
//! # Example
//!
//! ```no_run
//! use talking_trump::bot::PersonaBot;
//! use talking_trump::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     talking_trump::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let bot = PersonaBot::new(&config)?;
//!
//!     let reply = bot.reply("What about the economy?", &[]).await;
//!     println!("{}", reply.response);
//!     if let Some(url) = reply.audio_url {
//!         println!("Audio: {url}");
//!     }
//!
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod api;
pub mod bot;
pub mod clients;
pub mod core;
pub mod errors;
pub mod features;
pub mod prompt;

pub use bot::PersonaBot;
pub use errors::ChatError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called once at startup.
///
/// # Example
///
/// ```
/// talking_trump::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
