//! Error type shared by the drill core and the browser glue.

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::game::GamePhase;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DrillError {
    #[error("operation requires phase {expected:?}, game is in {actual:?}")]
    WrongPhase {
        expected: GamePhase,
        actual: GamePhase,
    },
    #[error("no prompt at index {0}")]
    NoCurrentPrompt(usize),
    #[error("input is locked while feedback is showing")]
    InputLocked,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    ConfigParse(#[from] serde_json::Error),
    #[error("speech synthesis is not supported in this browser")]
    SpeechUnavailable,
    #[error("speech synthesis failed: {0}")]
    Speech(String),
    #[error("dom: {0}")]
    Dom(String),
}

impl From<DrillError> for JsValue {
    fn from(err: DrillError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Render a JS exception for error messages. Strings come through as-is,
/// everything else through its debug form.
pub(crate) fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
