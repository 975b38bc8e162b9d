use tracing::{error, info, warn};

use crate::clients::NewsSource;
use crate::core::models::NewsItem;

/// Recent headlines for prompt context.
///
/// Never fails: an unconfigured source yields an empty list without a
/// request, and fetch errors are logged and also yield an empty list.
pub async fn fetch_recent_news(source: &dyn NewsSource) -> Vec<NewsItem> {
    if !source.is_configured() {
        warn!("No NEWS_API_KEY provided, skipping news fetch");
        return Vec::new();
    }

    match source.top_headlines().await {
        Ok(items) => {
            info!(count = items.len(), "Fetched recent news");
            items
        }
        Err(e) => {
            error!("Error fetching news: {}", e);
            Vec::new()
        }
    }
}
