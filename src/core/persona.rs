//! Persona definition handed to the text-generation model.
//!
//! Every piece of the persona (template, name variants, fallback sentence and
//! reference voice sample) can be replaced through the environment; the values
//! below are only the defaults.

use regex::Regex;
use std::env;
use url::Url;

pub const DEFAULT_NAME: &str = "Donald Trump";

pub const DEFAULT_ALIASES: [&str; 2] = ["Donald Trump", "Trump"];

pub const DEFAULT_FALLBACK: &str = "I'm having trouble thinking right now, but let me tell you something - this country needs strong leadership, and that's exactly what we had before!";

pub const HISTORY_PLACEHOLDER: &str = "{history}";
pub const NEWS_PLACEHOLDER: &str = "{news}";

pub const DEFAULT_TEMPLATE: &str = "You are Donald Trump in a video call. Respond as Trump would in a natural, conversational way.

CHARACTERISTIC SPEAKING PATTERNS:
- Use phrases like \"Let me tell you something\", \"Believe me\", \"Nobody knows more about [topic] than me\"
- Reference your past presidency and achievements
- Be confident and assertive, sometimes boastful
- Use simple, direct language that resonates with everyday Americans
- Talk about \"making America great again\"
- Use superlatives: \"tremendous\", \"incredible\", \"fantastic\", \"the best\"
- Reference specific numbers and statistics when possible
- Be conversational and engaging, like you're talking to a friend

IMPORTANT: Do NOT add any prefixes like 'Trump:', 'Donald Trump:', or any other speaker labels to your responses.

CONVERSATION HISTORY:
{history}

RECENT NEWS CONTEXT:
{news}

Respond to the user's message as Trump would, keeping it conversational and under 100 words.";

#[derive(Debug, Clone)]
pub struct Persona {
    pub name: String,
    pub aliases: Vec<String>,
    pub template: String,
    pub fallback: String,
    pub voice_sample_url: Option<String>,
    label_re: Regex,
}

impl Persona {
    /// # Errors
    ///
    /// Returns an error if no usable alias is given or the label pattern
    /// cannot be compiled.
    pub fn new(
        name: &str,
        aliases: &[&str],
        template: &str,
        fallback: &str,
        voice_sample_url: Option<String>,
    ) -> Result<Self, String> {
        let mut aliases: Vec<String> = aliases
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        if aliases.is_empty() {
            return Err("persona needs at least one name alias".to_string());
        }
        // Longest alias first so "Donald Trump:" wins over "Trump:".
        aliases.sort_by_key(|a| std::cmp::Reverse(a.chars().count()));

        let alternatives = aliases
            .iter()
            .map(|a| {
                a.split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect::<Vec<_>>()
            .join("|");
        let label_re = Regex::new(&format!(r"(?i)^\s*(?:{alternatives})\s*:\s*"))
            .map_err(|e| format!("invalid persona alias pattern: {e}"))?;

        Ok(Self {
            name: name.to_string(),
            aliases,
            template: template.to_string(),
            fallback: fallback.to_string(),
            voice_sample_url,
            label_re,
        })
    }

    /// Loads persona overrides from `PERSONA_*` and `VOICE_SAMPLE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if `VOICE_SAMPLE_URL` is not a valid URL or the alias
    /// list is empty.
    pub fn from_env() -> Result<Self, String> {
        let name = non_empty_var("PERSONA_NAME").unwrap_or_else(|| DEFAULT_NAME.to_string());
        let aliases_raw = non_empty_var("PERSONA_ALIASES");
        let aliases: Vec<&str> = match &aliases_raw {
            Some(raw) => raw.split(',').collect(),
            None => DEFAULT_ALIASES.to_vec(),
        };
        let template =
            non_empty_var("PERSONA_TEMPLATE").unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());
        let fallback =
            non_empty_var("PERSONA_FALLBACK").unwrap_or_else(|| DEFAULT_FALLBACK.to_string());

        let voice_sample_url = match non_empty_var("VOICE_SAMPLE_URL") {
            Some(raw) => {
                Url::parse(&raw).map_err(|e| format!("VOICE_SAMPLE_URL: {}", e))?;
                Some(raw)
            }
            None => None,
        };

        Self::new(&name, &aliases, &template, &fallback, voice_sample_url)
    }

    /// Trailing cue appended after the user turn, e.g. `Trump:`.
    #[must_use]
    pub fn cue(&self) -> String {
        let short = self
            .aliases
            .last()
            .map_or(self.name.as_str(), String::as_str);
        format!("{short}:")
    }

    /// Removes one leading speaker label such as `Donald Trump:`.
    #[must_use]
    pub fn strip_label<'a>(&self, text: &'a str) -> &'a str {
        match self.label_re.find(text) {
            Some(m) => &text[m.end()..],
            None => text,
        }
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::new(
            DEFAULT_NAME,
            &DEFAULT_ALIASES,
            DEFAULT_TEMPLATE,
            DEFAULT_FALLBACK,
            None,
        )
        .expect("default persona compiles")
    }
}

pub(crate) fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
