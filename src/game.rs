//! Game controller: start → playing → finished.
//!
//! The controller holds the batch of prompts for one game, the index of the
//! prompt being asked, and the feedback shown after an answer. Time is passed
//! in by the caller as milliseconds (`performance.now()` in the browser), so
//! the whole sequence can be driven deterministically in tests.
//!
//! After an answer the controller shows feedback for
//! `GameConfig::feedback_duration_ms`; the next `tick` past that deadline
//! moves to the next prompt, or to `Finished` after the last one. Input is
//! locked while feedback is showing.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::DrillError;
use crate::generator::{GeneratedPrompt, generate_batch};
use crate::report::GameStats;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Start,
    Playing,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Incorrect,
}

/// One question of a game, mutated in place as it is asked and answered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub category: String,
    pub number: i64,
    pub phrase: String,
    pub answer: i64,
    pub speech_text: String,
    pub start_time: Option<f64>, // set once, the first time the prompt is shown
    pub end_time: Option<f64>,
    pub user_answer: Option<i64>,
    pub is_correct: Option<bool>,
    pub time_spent: Option<f64>, // ms, measured by the input screen
    pub replay_count: u32,
}

impl Prompt {
    fn from_generated(id: String, g: GeneratedPrompt) -> Self {
        Self {
            id,
            category: g.category,
            number: g.number,
            phrase: g.phrase,
            answer: g.answer,
            speech_text: g.speech_text,
            start_time: None,
            end_time: None,
            user_answer: None,
            is_correct: None,
            time_spent: None,
            replay_count: 0,
        }
    }

    pub fn correct(&self) -> bool {
        self.is_correct.unwrap_or(false)
    }
}

/// Parse typed input the way a number field is read: surrounding whitespace
/// is ignored, an optional sign and the leading run of digits are taken, and
/// anything after them is dropped. No digits at all means no answer.
pub fn parse_answer(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

pub struct GameController {
    config: GameConfig,
    phase: GamePhase,
    prompts: Vec<Prompt>,
    index: usize,
    feedback: Feedback,
    advance_at: Option<f64>, // deadline of the pending feedback → next prompt step
}

impl GameController {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            phase: GamePhase::Start,
            prompts: Vec::new(),
            index: 0,
            feedback: Feedback::None,
            advance_at: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn current_prompt(&self) -> Option<&Prompt> {
        match self.phase {
            GamePhase::Playing => self.prompts.get(self.index),
            _ => None,
        }
    }

    pub fn accepts_input(&self) -> bool {
        self.phase == GamePhase::Playing && self.feedback == Feedback::None
    }

    /// Generate a fresh batch and begin at the first prompt. Starting over
    /// from any phase discards the previous batch. An empty batch has
    /// nothing to ask and finishes immediately.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R, now: f64) {
        let stamp = now.max(0.0) as u64;
        self.prompts = generate_batch(rng, self.config.game_length)
            .into_iter()
            .enumerate()
            .map(|(i, g)| Prompt::from_generated(format!("prompt-{i}-{stamp}"), g))
            .collect();
        self.index = 0;
        self.feedback = Feedback::None;
        self.advance_at = None;
        if self.prompts.is_empty() {
            log::warn!("game started with no prompts; finishing immediately");
            self.phase = GamePhase::Finished;
            return;
        }
        self.phase = GamePhase::Playing;
        log::info!("game started with {} prompts", self.prompts.len());
    }

    /// Record when the current prompt was first put in front of the player.
    /// Later calls (re-renders, replays) keep the original timestamp.
    pub fn mark_shown(&mut self, now: f64) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if let Some(p) = self.prompts.get_mut(self.index) {
            if p.start_time.is_none() {
                p.start_time = Some(now);
            }
        }
    }

    pub fn submit_answer(
        &mut self,
        raw_input: &str,
        time_spent_ms: f64,
        now: f64,
    ) -> Result<Feedback, DrillError> {
        self.require_phase(GamePhase::Playing)?;
        if self.feedback != Feedback::None {
            return Err(DrillError::InputLocked);
        }
        let user_answer = parse_answer(raw_input);
        let prompt = self
            .prompts
            .get_mut(self.index)
            .ok_or(DrillError::NoCurrentPrompt(self.index))?;
        let correct = user_answer == Some(prompt.answer);
        prompt.end_time = Some(now);
        prompt.user_answer = user_answer;
        prompt.is_correct = Some(correct);
        prompt.time_spent = Some(time_spent_ms.max(0.0));
        log::debug!(
            "prompt {} ({}): answered {:?}, expected {}, {:.0}ms",
            self.index,
            prompt.category,
            user_answer,
            prompt.answer,
            time_spent_ms
        );

        self.feedback = if correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        };
        self.advance_at = Some(now + self.config.feedback_duration_ms);
        Ok(self.feedback)
    }

    /// Advance once the feedback deadline has passed. Returns true when the
    /// visible state changed.
    pub fn tick(&mut self, now: f64) -> bool {
        match self.advance_at {
            Some(deadline) if now >= deadline && self.phase == GamePhase::Playing => {
                self.advance_at = None;
                self.feedback = Feedback::None;
                if self.index + 1 < self.prompts.len() {
                    self.index += 1;
                } else {
                    self.phase = GamePhase::Finished;
                    let stats = self.stats();
                    log::info!(
                        "game finished: {}/{} correct, {:.0}ms total",
                        stats.correct_count,
                        stats.total_count,
                        stats.total_time
                    );
                }
                true
            }
            _ => false,
        }
    }

    /// Count a replay of the current prompt's audio. Returns the new count.
    pub fn replay(&mut self) -> Result<u32, DrillError> {
        self.require_phase(GamePhase::Playing)?;
        if self.feedback != Feedback::None {
            return Err(DrillError::InputLocked);
        }
        let index = self.index;
        match self.prompts.get_mut(index) {
            Some(p) => {
                p.replay_count += 1;
                Ok(p.replay_count)
            }
            None => Err(DrillError::NoCurrentPrompt(index)),
        }
    }

    /// Drop the current game and return to the start screen.
    pub fn abort(&mut self) {
        if self.phase == GamePhase::Playing {
            log::info!("game aborted at prompt {}", self.index);
        }
        self.reset();
    }

    pub fn play_again(&mut self) -> Result<(), DrillError> {
        self.require_phase(GamePhase::Finished)?;
        self.reset();
        Ok(())
    }

    pub fn stats(&self) -> GameStats {
        GameStats::from_prompts(&self.prompts)
    }

    fn reset(&mut self) {
        self.phase = GamePhase::Start;
        self.prompts.clear();
        self.index = 0;
        self.feedback = Feedback::None;
        self.advance_at = None;
    }

    fn require_phase(&self, expected: GamePhase) -> Result<(), DrillError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(DrillError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
