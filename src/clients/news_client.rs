//! Headlines API client (newsapi.org `top-headlines`)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::NewsSource;
use crate::core::config::AppConfig;
use crate::core::models::NewsItem;
use crate::errors::ChatError;

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    articles: Option<Vec<Article>>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

impl From<Article> for NewsItem {
    fn from(article: Article) -> Self {
        NewsItem {
            title: article.title,
            description: article.description,
            url: article.url,
        }
    }
}

pub struct NewsClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    country: String,
    page_size: usize,
}

impl NewsClient {
    #[must_use]
    pub fn new(
        http: Client,
        api_key: Option<String>,
        base_url: String,
        country: String,
        page_size: usize,
    ) -> Self {
        Self {
            http,
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url,
            country,
            page_size,
        }
    }

    #[must_use]
    pub fn from_config(http: Client, config: &AppConfig) -> Self {
        Self::new(
            http,
            config.news_api_key.clone(),
            config.news_api_base_url.clone(),
            config.news_country.clone(),
            config.news_page_size,
        )
    }
}

#[async_trait]
impl NewsSource for NewsClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn top_headlines(&self) -> Result<Vec<NewsItem>, ChatError> {
        let Some(api_key) = &self.api_key else {
            return Err(ChatError::NewsError("NEWS_API_KEY is not set".to_string()));
        };

        let page_size = self.page_size.to_string();
        let response = self
            .http
            .get(format!("{}/top-headlines", self.base_url))
            .query(&[
                ("country", self.country.as_str()),
                ("apiKey", api_key.as_str()),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ChatError::NewsError(format!("Headlines request failed: {e}")))?;

        let status = response.status();
        let body: HeadlinesResponse = response.json().await.map_err(|e| {
            ChatError::NewsError(format!("Failed to parse headlines (status {status}): {e}"))
        })?;

        let items: Vec<NewsItem> = body
            .articles
            .unwrap_or_default()
            .into_iter()
            .take(self.page_size)
            .map(NewsItem::from)
            .collect();

        debug!(count = items.len(), %status, "Fetched headlines");
        Ok(items)
    }
}
