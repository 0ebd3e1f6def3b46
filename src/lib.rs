use wasm_bindgen::prelude::*;

pub mod quiz;
pub mod theory;

use quiz::session::Session;
use quiz::types::{Mode, Settings};
use theory::fretboard::FretPosition;
use theory::interval::Interval;
use theory::note::{order_by_pitch, Note};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::cell::RefCell;

thread_local! {
    static RNG: RefCell<Option<Pcg32>> = RefCell::new(None);
}

fn with_rng<T>(f: impl FnOnce(&mut Pcg32) -> T) -> T {
    RNG.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let rng = borrow.get_or_insert_with(Pcg32::from_entropy);
        f(rng)
    })
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Missing or `undefined` settings fall back to the defaults.
fn settings_from_js(value: JsValue) -> Result<Settings, JsValue> {
    if value.is_null() || value.is_undefined() {
        Ok(Settings::default())
    } else {
        from_js(value)
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_ok() {
        log::info!("interval trainer initialized");
    }
}

/// Generate one question for the given `{ mode, allow_altered }` settings.
#[wasm_bindgen]
pub fn generate_question(settings_js: JsValue) -> Result<JsValue, JsValue> {
    let settings = settings_from_js(settings_js)?;
    let question = with_rng(|rng| quiz::generators::generate_question(&settings, rng));
    to_js(&question)
}

/// Classify two notes in either order; they are sorted by pitch first.
#[wasm_bindgen]
pub fn classify_interval(a_js: JsValue, b_js: JsValue) -> Result<JsValue, JsValue> {
    let a: Note = from_js(a_js)?;
    let b: Note = from_js(b_js)?;
    let ordered = order_by_pitch(a, b);
    let interval = theory::interval::classify_interval(&ordered.low, &ordered.high)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&interval)
}

#[wasm_bindgen]
pub fn build_choice_set(correct_js: JsValue, allow_altered: bool) -> Result<JsValue, JsValue> {
    let correct: Interval = from_js(correct_js)?;
    let choices = with_rng(|rng| quiz::choices::build_choice_set(correct, allow_altered, rng));
    to_js(&choices)
}

#[wasm_bindgen]
pub fn format_interval_label(interval_js: JsValue) -> Result<String, JsValue> {
    let interval: Interval = from_js(interval_js)?;
    Ok(theory::interval::format_interval_label(&interval))
}

/// English name such as "Perfect 5th".
#[wasm_bindgen]
pub fn format_interval_name(interval_js: JsValue) -> Result<String, JsValue> {
    let interval: Interval = from_js(interval_js)?;
    Ok(interval.english_name())
}

#[wasm_bindgen]
pub fn format_note_label(note_js: JsValue) -> Result<String, JsValue> {
    let note: Note = from_js(note_js)?;
    Ok(theory::note::format_note_label(&note))
}

/// Parse a note name such as "F#4" or "Bb3" into a note object.
#[wasm_bindgen]
pub fn parse_note(name: &str) -> Result<JsValue, JsValue> {
    let note: Note = name.parse().map_err(|e: theory::note::NoteParseError| {
        JsValue::from_str(&e.to_string())
    })?;
    to_js(&note)
}

/// Best string/fret for a note, or `null` when it cannot be played.
#[wasm_bindgen]
pub fn best_fret_position(note_js: JsValue) -> Result<JsValue, JsValue> {
    let note: Note = from_js(note_js)?;
    match theory::fretboard::best_position(&note) {
        Some(pos) => to_js(&pos),
        None => Ok(JsValue::NULL),
    }
}

/// Note sounded at a string/fret, or `null` for an unknown string.
#[wasm_bindgen]
pub fn fret_position_to_note(pos_js: JsValue) -> Result<JsValue, JsValue> {
    let pos: FretPosition = from_js(pos_js)?;
    match theory::fretboard::position_to_note(&pos) {
        Some(note) => to_js(&note),
        None => Ok(JsValue::NULL),
    }
}

/// Drill session exposed to the page: one instance per open drill.
#[wasm_bindgen]
pub struct Trainer {
    session: Session<Pcg32>,
}

#[wasm_bindgen]
impl Trainer {
    #[wasm_bindgen(constructor)]
    pub fn new(settings_js: JsValue) -> Result<Trainer, JsValue> {
        let settings = settings_from_js(settings_js)?;
        Ok(Trainer {
            session: Session::new(settings, Pcg32::from_entropy()),
        })
    }

    /// Current question, choices and score.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.state())
    }

    pub fn next(&mut self) -> Result<JsValue, JsValue> {
        self.session.next_question();
        self.state()
    }

    /// Returns "correct", "incorrect" or "ignored".
    pub fn answer(&mut self, interval_js: JsValue) -> Result<JsValue, JsValue> {
        let selected: Interval = from_js(interval_js)?;
        to_js(&self.session.answer(&selected))
    }

    /// Answer by 0-based choice index; `null` when out of range.
    pub fn answer_index(&mut self, index: usize) -> Result<JsValue, JsValue> {
        match self.session.answer_index(index) {
            Some(outcome) => to_js(&outcome),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn feedback(&self) -> String {
        self.session.feedback()
    }

    /// Feedback naming the chosen and the correct interval.
    pub fn feedback_for(&self, interval_js: JsValue) -> Result<String, JsValue> {
        let selected: Interval = from_js(interval_js)?;
        Ok(self.session.feedback_for(&selected))
    }

    pub fn reveal(&self) -> String {
        self.session.reveal()
    }

    pub fn reset(&mut self) -> Result<JsValue, JsValue> {
        self.session.reset();
        self.state()
    }

    /// `"staff"` or `"tab"`.
    pub fn set_mode(&mut self, mode: &str) -> Result<JsValue, JsValue> {
        let mode = match mode {
            "staff" => Mode::Staff,
            "tab" => Mode::Tab,
            _ => return Err(JsValue::from_str(&format!("Unknown mode: {}", mode))),
        };
        self.session.set_mode(mode);
        self.state()
    }

    pub fn set_allow_altered(&mut self, allow_altered: bool) -> Result<JsValue, JsValue> {
        self.session.set_allow_altered(allow_altered);
        self.state()
    }
}
