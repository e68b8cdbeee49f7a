//! Game configuration.
//!
//! Defaults match the stock drill (ten prompts, one second of feedback,
//! Mandarin voice at 0.9 rate). A JSON object with any subset of the fields
//! can be passed to `start_game_with_config` from JS.

use serde::{Deserialize, Serialize};

use crate::error::DrillError;
use crate::speech::SpeechOptions;

pub const DEFAULT_GAME_LENGTH: usize = 10;
pub const DEFAULT_FEEDBACK_DURATION_MS: f64 = 1000.0;
pub const PROMPT_SPEECH_RATE: f64 = 0.9;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub game_length: usize,
    pub feedback_duration_ms: f64,
    pub speech: SpeechOptions,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_length: DEFAULT_GAME_LENGTH,
            feedback_duration_ms: DEFAULT_FEEDBACK_DURATION_MS,
            speech: SpeechOptions {
                rate: PROMPT_SPEECH_RATE,
                ..SpeechOptions::default()
            },
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, DrillError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), DrillError> {
        if self.game_length == 0 {
            return Err(DrillError::InvalidConfig(
                "game_length must be at least 1".into(),
            ));
        }
        if !self.feedback_duration_ms.is_finite() || self.feedback_duration_ms < 0.0 {
            return Err(DrillError::InvalidConfig(format!(
                "feedback_duration_ms must be a non-negative number, got {}",
                self.feedback_duration_ms
            )));
        }
        self.speech.validate()
    }
}
