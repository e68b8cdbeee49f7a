//! Random number phrases.
//!
//! Every generator takes the RNG explicitly: the browser seeds one from
//! entropy, tests use a fixed seed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::category::{NUMBER_CATEGORIES, NumberCategory};
use crate::numerals::format_for_speech;

/// One generated question before it is placed into a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPrompt {
    pub category: String,
    pub number: i64,
    /// Digits + unit, shown after answering (e.g. `0042号`).
    pub phrase: String,
    pub answer: i64,
    /// Chinese text handed to speech synthesis. Display padding is not
    /// spoken: ticket 0042 is read `四二号`.
    pub speech_text: String,
}

pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    rng.gen_range(min..=max)
}

pub fn random_category<R: Rng + ?Sized>(rng: &mut R) -> &'static NumberCategory {
    &NUMBER_CATEGORIES[rng.gen_range(0..NUMBER_CATEGORIES.len())]
}

/// Build the phrase for a specific category and value.
pub fn phrase_for(category: &NumberCategory, number: i64) -> GeneratedPrompt {
    GeneratedPrompt {
        category: category.name.to_string(),
        number,
        phrase: format!("{}{}", category.display_number(number), category.suffix),
        answer: number,
        speech_text: format!(
            "{}{}",
            format_for_speech(number, category.format),
            category.suffix
        ),
    }
}

pub fn generate_number_phrase<R: Rng + ?Sized>(rng: &mut R) -> GeneratedPrompt {
    let category = random_category(rng);
    let number = random_in_range(rng, category.min, category.max);
    phrase_for(category, number)
}

pub fn generate_batch<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<GeneratedPrompt> {
    (0..count).map(|_| generate_number_phrase(rng)).collect()
}
