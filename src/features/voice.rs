use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::clients::{ModelRef, ModelRunner};
use crate::core::persona::Persona;

/// Input payload for the speech model, cloning the reference sample.
#[must_use]
pub fn synthesis_input(text: &str, voice_sample_url: &str) -> Value {
    json!({
        "text": text,
        "voice_a": "custom_voice",
        "voice_b": "disabled",
        "voice_c": "disabled",
        "voice_d": "disabled",
        "preset": "fast",
        "seed": 0,
        "num_autoregressive_samples": 1,
        "diffusion_iterations": 30,
        "temperature": 0.8,
        "length_penalty": 1.0,
        "repetition_penalty": 2.0,
        "top_p": 0.8,
        "max_mel_tokens": 500,
        "cvvp_amount": 0.0,
        "breathing_room": 0.0,
        "custom_voice": voice_sample_url
    })
}

/// Speaks `text` in the persona's voice and returns the audio URL.
///
/// Returns `None` when no reference sample is configured, the model fails,
/// or the model produces no URL.
pub async fn synthesize_voice(
    runner: &dyn ModelRunner,
    model: &ModelRef,
    persona: &Persona,
    text: &str,
) -> Option<String> {
    let Some(sample_url) = persona.voice_sample_url.as_deref() else {
        warn!("No VOICE_SAMPLE_URL configured, skipping voice synthesis");
        return None;
    };

    match runner.run(model, synthesis_input(text, sample_url)).await {
        Ok(output) => {
            let audio_url = output
                .as_ref()
                .and_then(|o| o.first())
                .map(ToString::to_string);
            info!(audio_url = ?audio_url, "Generated audio URL");
            audio_url
        }
        Err(e) => {
            error!("Error generating voice: {}", e);
            None
        }
    }
}
