//! Browser screens for the drill: start, game, report.
//!
//! All state lives in a thread-local `AppState`. DOM events and the
//! `requestAnimationFrame` loop borrow it, mutate the `GameController`, and
//! re-render whichever screen the controller's phase calls for. Screens are
//! plain HTML strings with inline styles; only the listening indicator is
//! patched in place so typing is not interrupted when speech ends.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, window};

use crate::config::GameConfig;
use crate::error::DrillError;
use crate::game::{Feedback, GameController, GamePhase};
use crate::report::{Report, TimeMark, format_accuracy, format_seconds};
use crate::speech::WebSpeech;

const ROOT_ID: &str = "nd-root";
const INPUT_ID: &str = "nd-answer";
const INDICATOR_ID: &str = "nd-indicator";

/// Which screen (and which prompt/feedback within it) is currently on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ViewKey {
    phase: GamePhase,
    index: usize,
    feedback: Feedback,
}

struct AppState {
    game: GameController,
    rng: StdRng,
    speech: Rc<WebSpeech>,
    root: HtmlElement,
    shown: Option<ViewKey>,
    prompt_shown_ms: f64, // when the answer timer for the current prompt started
    speaking: bool,
    speech_epoch: u32, // bumped per utterance so a cancelled one cannot clear `speaking`
}

thread_local! {
    static APP: RefCell<Option<AppState>> = const { RefCell::new(None) };
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn document() -> Result<Document, DrillError> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| DrillError::Dom("no document".into()))
}

pub fn start_app(config: GameConfig) -> Result<(), JsValue> {
    let doc = document()?;

    // Create / reuse root container
    let root: HtmlElement = if let Some(el) = doc.get_element_by_id(ROOT_ID) {
        el.dyn_into()?
    } else {
        let el: HtmlElement = doc.create_element("div")?.dyn_into()?;
        el.set_id(ROOT_ID);
        el.set_attribute("style", "min-height:100vh; display:flex; align-items:center; justify-content:center; font-family:'Noto Sans SC', system-ui, sans-serif; background:#181818; color:#eee;").ok();
        doc.body()
            .ok_or_else(|| DrillError::Dom("no body".into()))?
            .append_child(&el)?;
        el
    };

    let already_running = APP.with(|cell| cell.borrow().is_some());
    APP.with(|cell| {
        *cell.borrow_mut() = Some(AppState {
            game: GameController::new(config),
            rng: StdRng::from_entropy(),
            speech: Rc::new(WebSpeech::new()),
            root: root.clone(),
            shown: None,
            prompt_shown_ms: 0.0,
            speaking: false,
            speech_epoch: 0,
        });
    });
    APP.with(|cell| match cell.borrow_mut().as_mut() {
        Some(state) => sync_view(state, now_ms()),
        None => Ok(()),
    })?;
    if already_running {
        // Listeners and frame loop from the previous call keep serving the new state.
        log::info!("drill restarted with new config");
        return Ok(());
    }

    // Click delegation: every button carries a data-action attribute.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let action = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("[data-action]").ok().flatten())
                .and_then(|el| el.get_attribute("data-action"));
            if let Some(action) = action {
                handle_action(&action);
            }
        }) as Box<dyn FnMut(_)>);
        root.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Enter in the answer field submits
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.key() == "Enter" {
                evt.prevent_default();
                handle_action("submit");
            }
        }) as Box<dyn FnMut(_)>);
        root.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_frame_loop();
    Ok(())
}

fn handle_action(action: &str) {
    let now = now_ms();
    APP.with(|cell| {
        let mut guard = cell.borrow_mut();
        let Some(state) = guard.as_mut() else {
            return;
        };
        let result = match action {
            "start" => {
                state.game.start(&mut state.rng, now);
                Ok(())
            }
            "submit" => submit(state, now),
            "replay" => state.game.replay().map(|count| {
                log::debug!("replay #{count}");
                speak_current(state);
            }),
            "abort" => {
                let confirmed = window()
                    .and_then(|w| {
                        w.confirm_with_message(
                            "Are you sure you want to abort the game? Your progress will be lost.",
                        )
                        .ok()
                    })
                    .unwrap_or(false);
                if confirmed {
                    state.speech.stop();
                    state.game.abort();
                }
                Ok(())
            }
            "play-again" => state.game.play_again(),
            other => {
                log::warn!("unknown action {other:?}");
                Ok(())
            }
        };
        if let Err(e) = result {
            log::debug!("{action} ignored: {e}");
        }
        if let Err(e) = sync_view(state, now) {
            log::error!("render failed: {e:?}");
        }
    });
}

fn submit(state: &mut AppState, now: f64) -> Result<(), DrillError> {
    if !state.game.accepts_input() {
        return Err(DrillError::InputLocked);
    }
    let input: HtmlInputElement = document()?
        .get_element_by_id(INPUT_ID)
        .and_then(|el| el.dyn_into().ok())
        .ok_or_else(|| DrillError::Dom("answer input missing".into()))?;
    let elapsed = now - state.prompt_shown_ms;
    state.game.submit_answer(&input.value(), elapsed, now)?;
    input.set_value("");
    state.speech.stop();
    state.speaking = false;
    Ok(())
}

fn speak_current(state: &mut AppState) {
    let Some(prompt) = state.game.current_prompt() else {
        return;
    };
    let text = prompt.speech_text.clone();
    let options = state.game.config().speech.clone();
    let speech = state.speech.clone();
    state.speech_epoch = state.speech_epoch.wrapping_add(1);
    let epoch = state.speech_epoch;
    state.speaking = true;
    render_indicator(state);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = speech.speak(&text, &options).await {
            log::warn!("speech error: {e}");
        }
        APP.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                if state.speech_epoch == epoch {
                    state.speaking = false;
                    render_indicator(state);
                }
            }
        });
    });
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        APP.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.game.tick(ts);
                if let Err(e) = sync_view(state, ts) {
                    log::error!("render failed: {e:?}");
                }
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Re-render when the controller moved to a different screen, prompt, or
/// feedback state since the last frame.
fn sync_view(state: &mut AppState, now: f64) -> Result<(), JsValue> {
    let key = ViewKey {
        phase: state.game.phase(),
        index: state.game.index(),
        feedback: state.game.feedback(),
    };
    if state.shown == Some(key) {
        return Ok(());
    }
    let new_prompt = key.phase == GamePhase::Playing
        && key.feedback == Feedback::None
        && state
            .shown
            .is_none_or(|k| k.phase != GamePhase::Playing || k.index != key.index);
    state.shown = Some(key);

    match key.phase {
        GamePhase::Start => state.root.set_inner_html(&start_screen_html()),
        GamePhase::Playing => {
            if new_prompt {
                state.game.mark_shown(now);
                state.prompt_shown_ms = now;
            }
            state.root.set_inner_html(&game_screen_html(state));
            if let Some(input) = document()?
                .get_element_by_id(INPUT_ID)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = input.focus();
            }
            if new_prompt {
                speak_current(state);
            }
        }
        GamePhase::Finished => {
            let report = Report::new(state.game.prompts());
            state.root.set_inner_html(&report_screen_html(&report));
        }
    }
    Ok(())
}

fn render_indicator(state: &AppState) {
    if let Ok(doc) = document() {
        if let Some(el) = doc.get_element_by_id(INDICATOR_ID) {
            el.set_inner_html(&indicator_html(state.speaking));
        }
    }
}

// --- Screen markup ----------------------------------------------------------

const CARD_STYLE: &str = "background:#222; border:2px solid #333; border-radius:18px; padding:32px 40px; box-shadow:0 0 32px 0 rgba(0,0,0,0.18); text-align:center; min-width:320px;";
const BUTTON_STYLE: &str = "font-size:18px; padding:10px 24px; border-radius:10px; border:none; background:#ffb347; color:#181818; cursor:pointer; margin:8px;";

fn start_screen_html() -> String {
    format!(
        "<div style=\"{CARD_STYLE}\">\
           <h1 style='margin-top:0'>Chinese Number Drill</h1>\
           <p>Listen to numbers and type your answer quickly!</p>\
           <button data-action='start' style=\"{BUTTON_STYLE}\">Start Game</button>\
         </div>"
    )
}

fn indicator_html(speaking: bool) -> String {
    if speaking {
        "<p style='opacity:0.8'>Please listen...</p>\
         <div style='font-size:28px; letter-spacing:6px; color:#ffb347;'>▮▮▮▮</div>"
            .to_string()
    } else {
        "<button data-action='replay' aria-label='Replay audio' title='Replay' \
          style='font-size:40px; background:none; border:none; cursor:pointer;'>🔊</button>"
            .to_string()
    }
}

fn game_screen_html(state: &AppState) -> String {
    let feedback = state.game.feedback();
    let border = match feedback {
        Feedback::Correct => "#3ecf6e",
        Feedback::Incorrect => "#ff4d4d",
        Feedback::None => "#333",
    };
    let centre = match (feedback, state.game.current_prompt()) {
        (Feedback::None, _) | (_, None) => format!(
            "<div id='{INDICATOR_ID}'>{}</div>",
            indicator_html(state.speaking)
        ),
        (_, Some(prompt)) => format!(
            "<div style=\"font-size:48px; font-family:'Noto Serif SC', 'SimSun', serif;\">{}</div>",
            prompt.phrase
        ),
    };
    let disabled = if feedback == Feedback::None { "" } else { "disabled" };
    format!(
        "<div style=\"{CARD_STYLE} border-color:{border};\">\
           <div style='text-align:right'>\
             <button data-action='abort' style='background:none; border:1px solid #555; color:#aaa; border-radius:6px; cursor:pointer;'>Abort Game</button>\
           </div>\
           <div style='opacity:0.6; font-size:14px;'>{} / {}</div>\
           <div style='min-height:110px; display:flex; flex-direction:column; align-items:center; justify-content:center;'>{centre}</div>\
           <div>\
             <input id='{INPUT_ID}' type='number' placeholder='Enter number' autofocus {disabled} \
               style='font-size:22px; padding:8px 12px; border-radius:8px; border:1px solid #444; background:#111; color:#eee; width:180px;'/>\
             <button data-action='submit' {disabled} style=\"{BUTTON_STYLE}\">Submit</button>\
           </div>\
         </div>",
        state.game.index() + 1,
        state.game.prompts().len(),
    )
}

fn report_screen_html(report: &Report) -> String {
    let stats = &report.stats;
    let shortest = report
        .shortest_correct_time
        .filter(|t| *t > 0.0)
        .map(format_seconds)
        .unwrap_or_else(|| "N/A".to_string());
    let tiles = [
        ("Average Time", format_seconds(stats.average_time)),
        ("Total Time", format_seconds(stats.total_time)),
        ("Longest Time", format_seconds(stats.longest_time)),
        ("Shortest Time", shortest),
        (
            "Correct",
            format!("{} / {}", stats.correct_count, stats.total_count),
        ),
        ("Accuracy", format_accuracy(stats)),
    ];
    let mut html = format!(
        "<div style=\"{CARD_STYLE}\"><h1 style='margin-top:0'>Game Complete</h1>\
         <div style='display:grid; grid-template-columns:repeat(3, 1fr); gap:12px;'>"
    );
    for (label, value) in tiles {
        html.push_str(&format!(
            "<div><div style='opacity:0.6; font-size:13px;'>{label}</div>\
             <div style='font-size:22px;'>{value}</div></div>"
        ));
    }
    html.push_str("</div><h2>Question Details</h2><div style='text-align:left;'>");
    for row in &report.rows {
        let replay = if row.replay_count > 0 {
            format!("🔄 {}", row.replay_count)
        } else {
            "&nbsp;".to_string()
        };
        let (mark, color) = if row.correct {
            ("✓", "#3ecf6e")
        } else {
            ("✗", "#ff4d4d")
        };
        let mut time = String::new();
        for m in &row.marks {
            time.push_str(match m {
                TimeMark::Longest => "<span style='color:#ff9f43'>Longest: </span>",
                TimeMark::Shortest => "<span style='color:#54a0ff'>Shortest: </span>",
            });
        }
        time.push_str(
            &row.time_spent
                .filter(|t| *t > 0.0)
                .map(format_seconds)
                .unwrap_or_else(|| "N/A".to_string()),
        );
        html.push_str(&format!(
            "<div style='display:grid; grid-template-columns:40px 1fr 60px 30px 160px; padding:4px 0; border-bottom:1px solid #333;'>\
             <span>#{}</span><span>{}</span><span>{replay}</span>\
             <span style='color:{color}'>{mark}</span><span>{time}</span></div>",
            row.position, row.phrase
        ));
    }
    html.push_str(&format!(
        "</div><button data-action='play-again' style=\"{BUTTON_STYLE} margin-top:20px;\">Play Again</button></div>"
    ));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Prompt;

    #[test]
    fn test_start_screen_has_start_action() {
        let html = start_screen_html();
        assert!(html.contains("data-action='start'"));
        assert!(html.contains("Chinese Number Drill"));
    }

    #[test]
    fn test_indicator_switches_between_listening_and_replay() {
        assert!(indicator_html(true).contains("Please listen"));
        assert!(indicator_html(false).contains("data-action='replay'"));
    }

    #[test]
    fn test_report_screen_rows() {
        let prompts = vec![Prompt {
            id: "prompt-0-0".into(),
            category: "bus".into(),
            number: 42,
            phrase: "42路".into(),
            answer: 42,
            speech_text: "四十二路".into(),
            start_time: Some(0.0),
            end_time: Some(1500.0),
            user_answer: Some(42),
            is_correct: Some(true),
            time_spent: Some(1500.0),
            replay_count: 2,
        }];
        let html = report_screen_html(&Report::new(&prompts));
        assert!(html.contains("42路"));
        assert!(html.contains("🔄 2"));
        assert!(html.contains("1 / 1"));
        assert!(html.contains("100.0%"));
        assert!(html.contains("Longest: "));
        assert!(html.contains("Shortest: "));
        assert!(html.contains("data-action='play-again'"));
    }
}
