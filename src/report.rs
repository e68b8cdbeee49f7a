//! End-of-game statistics and the rows of the report screen.

use serde::{Deserialize, Serialize};

use crate::game::Prompt;

/// Aggregate over one finished game. Times are milliseconds; with no timed
/// prompts every time field is 0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub average_time: f64,
    pub longest_time: f64,
    pub shortest_time: f64,
    pub total_time: f64,
    pub correct_count: usize,
    pub total_count: usize,
}

impl GameStats {
    pub fn from_prompts(prompts: &[Prompt]) -> Self {
        let times: Vec<f64> = prompts.iter().filter_map(|p| p.time_spent).collect();
        let total_time: f64 = times.iter().sum();
        let (average_time, longest_time, shortest_time) = if times.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                total_time / times.len() as f64,
                times.iter().copied().fold(f64::MIN, f64::max),
                times.iter().copied().fold(f64::MAX, f64::min),
            )
        };
        Self {
            average_time,
            longest_time,
            shortest_time,
            total_time,
            correct_count: prompts.iter().filter(|p| p.correct()).count(),
            total_count: prompts.len(),
        }
    }

    /// Percentage of correct answers, 0 for an empty game.
    pub fn accuracy(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.correct_count as f64 / self.total_count as f64 * 100.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeMark {
    Longest,
    Shortest,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub id: String,
    pub position: usize, // 1-based
    pub phrase: String,
    pub replay_count: u32,
    pub correct: bool,
    pub time_spent: Option<f64>,
    pub marks: Vec<TimeMark>,
}

/// Everything the report screen shows.
///
/// The fastest time is taken over correct answers only, so a quick wrong
/// guess never wins. The slowest time is taken over every timed prompt. All
/// prompts tied for either extreme are marked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub stats: GameStats,
    pub shortest_correct_time: Option<f64>,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn new(prompts: &[Prompt]) -> Self {
        let stats = GameStats::from_prompts(prompts);
        let shortest_correct_time = prompts
            .iter()
            .filter(|p| p.correct())
            .filter_map(|p| p.time_spent)
            .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |a| a.min(t))));
        let has_timed = prompts.iter().any(|p| p.time_spent.is_some());

        let rows = prompts
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let mut marks = Vec::new();
                if has_timed && p.time_spent == Some(stats.longest_time) {
                    marks.push(TimeMark::Longest);
                }
                let is_fastest = shortest_correct_time.is_some() && p.time_spent == shortest_correct_time;
                if p.correct() && is_fastest {
                    marks.push(TimeMark::Shortest);
                }
                ReportRow {
                    id: p.id.clone(),
                    position: i + 1,
                    phrase: p.phrase.clone(),
                    replay_count: p.replay_count,
                    correct: p.correct(),
                    time_spent: p.time_spent,
                    marks,
                }
            })
            .collect();

        Self {
            stats,
            shortest_correct_time,
            rows,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// 1234.0 → "1.23s"
pub fn format_seconds(ms: f64) -> String {
    format!("{:.2}s", ms / 1000.0)
}

pub fn format_accuracy(stats: &GameStats) -> String {
    if stats.total_count == 0 {
        "0%".to_string()
    } else {
        format!("{:.1}%", stats.accuracy())
    }
}
