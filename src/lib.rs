//! Chinese number listening drill.
//!
//! The player hears a number phrase such as 一九九八年 or 三零五号 read by the
//! browser's speech synthesizer, types the digits, gets a second of
//! correct/incorrect feedback, and sees a timing report after the last prompt.
//! `start_game()` mounts the screens; the numeral readings, phrase generator,
//! game controller and report math are plain Rust and usable natively.

use wasm_bindgen::prelude::*;

pub mod category;
pub mod config;
pub mod error;
pub mod game;
pub mod generator;
pub mod numerals;
pub mod report;
pub mod speech;
mod ui;

pub use category::{NUMBER_CATEGORIES, NumberCategory, category_by_name};
pub use config::GameConfig;
pub use error::DrillError;
pub use game::{Feedback, GameController, GamePhase, Prompt, parse_answer};
pub use generator::{GeneratedPrompt, generate_batch, generate_number_phrase};
pub use numerals::{
    NumberFormat, digit_to_chinese, digits_to_chinese, format_for_speech, number_to_chinese,
    year_to_chinese,
};
pub use report::{GameStats, Report};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

static LOGGER: std::sync::Once = std::sync::Once::new();

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    LOGGER.call_once(|| {
        wasm_logger::init(wasm_logger::Config::default());
        log::info!("Logging initialized");
    });
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    ui::start_app(GameConfig::default())
}

/// Same as `start_game` with a JSON config, e.g. `{"game_length": 20}`.
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)?;
    ui::start_app(config)
}

/// Regular Chinese reading of `n`, exposed for page scripts.
#[wasm_bindgen]
pub fn chinese_reading(n: i32) -> String {
    number_to_chinese(n as i64)
}
