//! Client modules for external API interactions

use async_trait::async_trait;
use serde_json::Value;

use crate::core::models::{ModelOutput, NewsItem};
use crate::errors::ChatError;

pub mod news_client;
pub mod replicate_client;

pub use news_client::NewsClient;
pub use replicate_client::{ModelRef, ReplicateClient};

/// Source of recent headlines.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Whether credentials are present; no request is made otherwise.
    fn is_configured(&self) -> bool;

    async fn top_headlines(&self) -> Result<Vec<NewsItem>, ChatError>;
}

/// Runs a hosted model to completion and returns its output.
#[async_trait]
pub trait ModelRunner: Send + Sync {
    async fn run(&self, model: &ModelRef, input: Value) -> Result<Option<ModelOutput>, ChatError>;
}
