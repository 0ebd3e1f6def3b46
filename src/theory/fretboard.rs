use serde::{Deserialize, Serialize};

use crate::theory::note::{spell_from_semitone, Note};

/// Highest fret considered playable.
pub const MAX_FRET: i32 = 17;

/// Standard EADGBE tuning as (string, open-string semitone), low E first.
pub const GUITAR_TUNING: [(u8, i32); 6] = [(6, 40), (5, 45), (4, 50), (3, 55), (2, 59), (1, 64)];

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FretPosition {
    pub string: u8,
    pub fret: i32,
}

impl FretPosition {
    pub fn new(string: u8, fret: i32) -> Self {
        FretPosition { string, fret }
    }

    /// Ergonomic cost: middle strings and low frets are cheaper.
    fn cost(&self) -> f64 {
        (self.string as f64 - 3.5).abs() * 2.0 + self.fret as f64 * 0.5
    }
}

pub fn open_string_semitone(string: u8) -> Option<i32> {
    GUITAR_TUNING
        .iter()
        .find(|(s, _)| *s == string)
        .map(|&(_, semitone)| semitone)
}

/// Every string/fret (fret 0..=17) that sounds the note's pitch.
pub fn positions_for_note(note: &Note) -> Vec<FretPosition> {
    let semitone = note.semitone();
    GUITAR_TUNING
        .iter()
        .filter_map(|&(string, open)| {
            let fret = semitone - i64::from(open);
            (0..=i64::from(MAX_FRET))
                .contains(&fret)
                .then(|| FretPosition::new(string, fret as i32))
        })
        .collect()
}

/// Cheapest playable position for a note; the first candidate wins ties.
pub fn best_position(note: &Note) -> Option<FretPosition> {
    let mut best: Option<FretPosition> = None;
    for pos in positions_for_note(note) {
        match best {
            Some(current) if current.cost() <= pos.cost() => {}
            _ => best = Some(pos),
        }
    }
    best
}

pub fn position_to_semitone(pos: &FretPosition) -> Option<i32> {
    open_string_semitone(pos.string).and_then(|open| open.checked_add(pos.fret))
}

pub fn position_to_note(pos: &FretPosition) -> Option<Note> {
    position_to_semitone(pos).map(spell_from_semitone)
}
