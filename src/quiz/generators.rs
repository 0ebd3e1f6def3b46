use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz::types::{Direction, Mode, Question, Settings, TabPositions};
use crate::theory::fretboard::{position_to_semitone, FretPosition};
use crate::theory::interval::{classify_interval, Interval, Quality};
use crate::theory::note::{
    is_natural_semitone, order_by_pitch, spell_from_semitone, Letter, Note,
};

const STAFF_ATTEMPTS: usize = 400;
const TAB_ATTEMPTS: usize = 1200;

/// Largest semitone span either generator will produce.
const MAX_SPAN: i32 = 12;

// Staff window, C4..C5
const RANGE_LOW: Note = Note {
    letter: Letter::C,
    accidental: 0,
    octave: 4,
};
const RANGE_HIGH: Note = Note {
    letter: Letter::C,
    accidental: 0,
    octave: 5,
};

// Fretboard comfort window
const WINDOW_MIN: i32 = 0;
const WINDOW_MAX: i32 = 12;
const WINDOW_WIDTH: i32 = 4;
const MAX_FRET_SPAN: i32 = 4;
const MAX_STRING_SPAN: u8 = 2;
const UNISON_DISCARD_PROBABILITY: f64 = 0.65;

const FALLBACK_TAB: TabPositions = TabPositions {
    left: FretPosition { string: 4, fret: 2 },
    right: FretPosition { string: 3, fret: 2 },
};

pub fn generate_question<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Question {
    match settings.mode {
        Mode::Staff => generate_staff_question(settings.allow_altered, rng),
        Mode::Tab => generate_tab_question(settings.allow_altered, rng),
    }
}

fn allowed_accidentals(allow_altered: bool) -> &'static [i8] {
    if allow_altered {
        &[-1, 0, 1]
    } else {
        &[0]
    }
}

/// Two notes within C4..C5, each optionally sharpened or flattened.
pub fn generate_staff_question<R: Rng + ?Sized>(allow_altered: bool, rng: &mut R) -> Question {
    staff_question_within(STAFF_ATTEMPTS, allow_altered, rng)
}

fn staff_question_within<R: Rng + ?Sized>(
    attempts: usize,
    allow_altered: bool,
    rng: &mut R,
) -> Question {
    let low_index = RANGE_LOW.diatonic_index();
    let high_index = RANGE_HIGH.diatonic_index();
    let accidentals = allowed_accidentals(allow_altered);

    for _ in 0..attempts {
        let number: i64 = rng.gen_range(1..=8);

        let max_low = high_index - (number - 1);
        if max_low < low_index {
            continue;
        }
        let start = rng.gen_range(low_index..=max_low);

        let first = Note::from_diatonic_index(start, *accidentals.choose(rng).unwrap_or(&0));
        let second = Note::from_diatonic_index(
            start + number - 1,
            *accidentals.choose(rng).unwrap_or(&0),
        );

        let ordered = order_by_pitch(first, second);
        let span = ordered.high.semitone() - ordered.low.semitone();
        if !(0..=i64::from(MAX_SPAN)).contains(&span) {
            continue;
        }

        let direction = if rng.gen_bool(0.5) {
            Direction::Up
        } else {
            Direction::Down
        };
        let (left, right) = match direction {
            Direction::Up => (ordered.low, ordered.high),
            Direction::Down => (ordered.high, ordered.low),
        };

        let answer = match classify_interval(&ordered.low, &ordered.high) {
            Ok(interval) => interval,
            Err(_) => continue,
        };

        return Question {
            left,
            right,
            direction,
            answer,
            tab: None,
        };
    }

    debug!("staff generator exhausted {} attempts, using fallback", attempts);
    staff_fallback()
}

/// Descending perfect octave, C5 to C4.
fn staff_fallback() -> Question {
    Question {
        left: RANGE_HIGH,
        right: RANGE_LOW,
        direction: Direction::Down,
        answer: Interval::new(8, Quality::Perfect),
        tab: None,
    }
}

/// Two fretted notes inside a four-fret window, at most two strings apart.
pub fn generate_tab_question<R: Rng + ?Sized>(allow_altered: bool, rng: &mut R) -> Question {
    for _ in 0..TAB_ATTEMPTS {
        let window_start = rng.gen_range(WINDOW_MIN..=(WINDOW_MAX - WINDOW_WIDTH).max(WINDOW_MIN));
        let window_end = window_start + WINDOW_WIDTH;

        let first_string: u8 = rng.gen_range(1..=6);
        let second_string: u8 = rng.gen_range(
            first_string.saturating_sub(MAX_STRING_SPAN).max(1)
                ..=(first_string + MAX_STRING_SPAN).min(6),
        );

        let first_fret = rng.gen_range(window_start..=window_end);
        let second_fret = rng.gen_range(
            (first_fret - MAX_FRET_SPAN).max(window_start)
                ..=(first_fret + MAX_FRET_SPAN).min(window_end),
        );

        let left_pos = FretPosition::new(first_string, first_fret);
        let right_pos = FretPosition::new(second_string, second_fret);
        if left_pos == right_pos {
            continue;
        }

        let (Some(left_semi), Some(right_semi)) = (
            position_to_semitone(&left_pos),
            position_to_semitone(&right_pos),
        ) else {
            continue;
        };

        if !allow_altered && !(is_natural_semitone(left_semi) && is_natural_semitone(right_semi)) {
            continue;
        }

        let span = (right_semi - left_semi).abs();
        if span > MAX_SPAN {
            continue;
        }

        // Unisons stay possible but rarer
        if span == 0 && rng.gen_bool(UNISON_DISCARD_PROBABILITY) {
            continue;
        }

        if let Some(question) = tab_question(left_pos, right_pos) {
            return question;
        }
    }

    debug!("tab generator exhausted {} attempts, using fallback", TAB_ATTEMPTS);
    match tab_question(FALLBACK_TAB.left, FALLBACK_TAB.right) {
        Some(question) => question,
        None => {
            warn!("tab fallback positions could not be classified");
            staff_fallback()
        }
    }
}

/// Spells and classifies a pair of fretboard positions. `None` for unknown
/// strings or a pair whose letter distance falls outside 1..=8.
fn tab_question(left_pos: FretPosition, right_pos: FretPosition) -> Option<Question> {
    let left_semi = position_to_semitone(&left_pos)?;
    let right_semi = position_to_semitone(&right_pos)?;

    let left = spell_from_semitone(left_semi);
    let right = spell_from_semitone(right_semi);

    let ordered = order_by_pitch(left, right);
    let answer = classify_interval(&ordered.low, &ordered.high).ok()?;

    let direction = if right_semi >= left_semi {
        Direction::Up
    } else {
        Direction::Down
    };

    Some(Question {
        left,
        right,
        direction,
        answer,
        tab: Some(TabPositions {
            left: left_pos,
            right: right_pos,
        }),
    })
}
