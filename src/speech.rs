//! Thin wrapper around the Web Speech API.
//!
//! `speak` resolves when the utterance finishes and fails when the browser
//! reports an error. Any utterance still playing is cancelled first, so a
//! replay always restarts from the beginning.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{SpeechSynthesis, SpeechSynthesisErrorEvent, SpeechSynthesisUtterance, window};

use crate::config::PROMPT_SPEECH_RATE;
use crate::error::{DrillError, js_message};

/// Utterance settings. `Default` is the plain Web Speech default (rate 1.0);
/// fields missing from a deserialized config take the prompt voice instead,
/// so a partial `speech` object keeps the slower prompt rate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeechOptions {
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "prompt_rate")]
    pub rate: f64,
    #[serde(default = "unit")]
    pub pitch: f64,
    #[serde(default = "unit")]
    pub volume: f64,
}

fn default_lang() -> String {
    "zh-CN".to_string()
}
fn prompt_rate() -> f64 {
    PROMPT_SPEECH_RATE
}
fn unit() -> f64 {
    1.0
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

impl SpeechOptions {
    /// Ranges accepted by `SpeechSynthesisUtterance`.
    pub fn validate(&self) -> Result<(), DrillError> {
        let checks = [
            ("rate", self.rate, 0.1, 10.0),
            ("pitch", self.pitch, 0.0, 2.0),
            ("volume", self.volume, 0.0, 1.0),
        ];
        for (name, value, lo, hi) in checks {
            if !(lo..=hi).contains(&value) {
                return Err(DrillError::InvalidConfig(format!(
                    "speech {name} must be within {lo}..={hi}, got {value}"
                )));
            }
        }
        if self.lang.trim().is_empty() {
            return Err(DrillError::InvalidConfig("speech lang is empty".into()));
        }
        Ok(())
    }
}

pub struct WebSpeech {
    synth: Option<SpeechSynthesis>,
}

impl WebSpeech {
    pub fn new() -> Self {
        let synth = window().and_then(|w| w.speech_synthesis().ok());
        if synth.is_none() {
            log::warn!("speechSynthesis not available; prompts will be silent");
        }
        Self { synth }
    }

    pub fn is_available(&self) -> bool {
        self.synth.is_some()
    }

    pub fn is_speaking(&self) -> bool {
        self.synth.as_ref().map(|s| s.speaking()).unwrap_or(false)
    }

    pub fn stop(&self) {
        if let Some(s) = &self.synth {
            s.cancel();
        }
    }

    pub async fn speak(&self, text: &str, options: &SpeechOptions) -> Result<(), DrillError> {
        let synth = self.synth.as_ref().ok_or(DrillError::SpeechUnavailable)?;
        synth.cancel();

        let utterance = SpeechSynthesisUtterance::new_with_text(text)
            .map_err(|e| DrillError::Speech(js_message(&e)))?;
        utterance.set_lang(&options.lang);
        utterance.set_rate(options.rate as f32);
        utterance.set_pitch(options.pitch as f32);
        utterance.set_volume(options.volume as f32);

        let finished = js_sys::Promise::new(&mut |resolve, reject| {
            let on_end = Closure::once_into_js(move |_evt: JsValue| {
                let _ = resolve.call0(&JsValue::NULL);
            });
            utterance.set_onend(Some(on_end.unchecked_ref()));
            let on_error = Closure::once_into_js(move |evt: SpeechSynthesisErrorEvent| {
                let reason = JsValue::from_str(&format!("{:?}", evt.error()));
                let _ = reject.call1(&JsValue::NULL, &reason);
            });
            utterance.set_onerror(Some(on_error.unchecked_ref()));
        });

        log::debug!("speaking {text:?} ({})", options.lang);
        synth.speak(&utterance);
        JsFuture::from(finished)
            .await
            .map(|_| ())
            .map_err(|e| DrillError::Speech(js_message(&e)))
    }
}

impl Default for WebSpeech {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let o = SpeechOptions::default();
        assert_eq!(o.lang, "zh-CN");
        assert_eq!(o.rate, 1.0);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_take_prompt_voice() {
        let o: SpeechOptions = serde_json::from_str(r#"{"volume": 0.5}"#).unwrap();
        assert_eq!(o.lang, "zh-CN");
        assert!((o.rate - PROMPT_SPEECH_RATE).abs() < 1e-9);
        assert_eq!(o.pitch, 1.0);
        assert_eq!(o.volume, 0.5);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let o = SpeechOptions {
            volume: 1.5,
            ..SpeechOptions::default()
        };
        assert!(o.validate().is_err());
        let o = SpeechOptions {
            rate: 0.0,
            ..SpeechOptions::default()
        };
        assert!(o.validate().is_err());
        let o = SpeechOptions {
            lang: " ".into(),
            ..SpeechOptions::default()
        };
        assert!(o.validate().is_err());
    }
}
