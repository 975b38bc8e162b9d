use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::core::models::{HistoryEntry, NewsItem};
use crate::core::persona::{HISTORY_PLACEHOLDER, NEWS_PLACEHOLDER, Persona};

/// Shown in place of the conversation when there is no history yet
pub const NO_HISTORY: &str = "No previous conversation.";

/// Shown in place of headlines when the news fetch returned nothing
pub const NO_NEWS: &str = "No recent news available.";

/// Decoding parameters for the text-generation model
pub const MAX_NEW_TOKENS: u32 = 150;
pub const TEMPERATURE: f64 = 0.8;
pub const TOP_P: f64 = 0.9;
pub const REPETITION_PENALTY: f64 = 1.1;

/// Renders history as `sender: message` lines.
#[must_use]
pub fn render_history(history: &[HistoryEntry]) -> String {
    if history.is_empty() {
        return NO_HISTORY.to_string();
    }
    history
        .iter()
        .map(|entry| format!("{}: {}", entry.sender, entry.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders headlines as `title: description` lines.
#[must_use]
pub fn render_news(news: &[NewsItem]) -> String {
    if news.is_empty() {
        return NO_NEWS.to_string();
    }
    news.iter()
        .map(|item| {
            format!(
                "{}: {}",
                item.title.as_deref().unwrap_or_default(),
                item.description.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Persona system prompt with history and news filled in.
#[must_use]
pub fn system_prompt(persona: &Persona, news: &[NewsItem], history: &[HistoryEntry]) -> String {
    static PLACEHOLDER_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\{(?:history|news)\}").expect("static regex compile"));

    let history_text = render_history(history);
    let news_text = render_news(news);

    // Single pass so placeholders inside user-provided history stay literal
    PLACEHOLDER_RE
        .replace_all(&persona.template, |caps: &Captures<'_>| match &caps[0] {
            HISTORY_PLACEHOLDER => history_text.clone(),
            NEWS_PLACEHOLDER => news_text.clone(),
            other => other.to_string(),
        })
        .into_owned()
}

/// Full prompt: system prompt, user turn, then the persona cue.
#[must_use]
pub fn build_prompt(
    persona: &Persona,
    message: &str,
    news: &[NewsItem],
    history: &[HistoryEntry],
) -> String {
    format!(
        "{}\n\nUser: {}\n\n{}",
        system_prompt(persona, news, history),
        message,
        persona.cue()
    )
}

/// Trims model output and drops a leading speaker label.
#[must_use]
pub fn sanitize_response(persona: &Persona, raw: &str) -> String {
    persona.strip_label(raw.trim()).trim().to_string()
}
