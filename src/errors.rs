use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Invalid request: {0}")]
    ValidationError(String),

    #[error("Failed to parse request: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to fetch news: {0}")]
    NewsError(String),

    #[error("Failed to run hosted model: {0}")]
    ModelError(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(error: reqwest::Error) -> Self {
        ChatError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(error: serde_json::Error) -> Self {
        ChatError::ParseError(error.to_string())
    }
}
