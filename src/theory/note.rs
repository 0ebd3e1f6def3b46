use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

pub const LETTERS: [Letter; 7] = [
    Letter::C,
    Letter::D,
    Letter::E,
    Letter::F,
    Letter::G,
    Letter::A,
    Letter::B,
];

impl Letter {
    /// Position within the diatonic cycle, C = 0 .. B = 6.
    pub fn ordinal(self) -> i64 {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    pub fn natural_pitch_class(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    pub fn from_ordinal(ordinal: i64) -> Letter {
        LETTERS[ordinal.rem_euclid(7) as usize]
    }

    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Letter::C => "C",
            Letter::D => "D",
            Letter::E => "E",
            Letter::F => "F",
            Letter::G => "G",
            Letter::A => "A",
            Letter::B => "B",
        }
    }
}

/// A spelled pitch: letter, accidental (-2 double flat .. 2 double sharp) and octave.
/// Octave numbering follows scientific pitch, so C4 is middle C.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Note {
    pub letter: Letter,
    #[serde(default)]
    pub accidental: i8,
    pub octave: i32,
}

impl Note {
    pub fn new(letter: Letter, accidental: i8, octave: i32) -> Self {
        Note {
            letter,
            accidental,
            octave,
        }
    }

    pub fn natural(letter: Letter, octave: i32) -> Self {
        Note::new(letter, 0, octave)
    }

    /// Absolute pitch in semitones, using MIDI numbering (C4 = 60).
    /// Defined for every `i32` octave.
    pub fn semitone(&self) -> i64 {
        (i64::from(self.octave) + 1) * 12
            + i64::from(self.letter.natural_pitch_class())
            + i64::from(self.accidental)
    }

    /// Letter-step index, ignoring accidentals.
    pub fn diatonic_index(&self) -> i64 {
        i64::from(self.octave) * 7 + self.letter.ordinal()
    }

    /// Note on a diatonic index with the given accidental. The octave saturates
    /// at the `i32` bounds.
    pub fn from_diatonic_index(index: i64, accidental: i8) -> Self {
        let octave = index
            .div_euclid(7)
            .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        Note::new(Letter::from_ordinal(index), accidental, octave)
    }

    pub fn is_pitch_equal(&self, other: &Note) -> bool {
        self.semitone() == other.semitone()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.letter.as_str(),
            format_accidental(self.accidental as i32),
            self.octave
        )
    }
}

/// Canonical spelling for a pitch with no spelling context: naturals and sharps only.
pub fn spell_from_semitone(semitone: i32) -> Note {
    const SPELLING: [(Letter, i8); 12] = [
        (Letter::C, 0),
        (Letter::C, 1),
        (Letter::D, 0),
        (Letter::D, 1),
        (Letter::E, 0),
        (Letter::F, 0),
        (Letter::F, 1),
        (Letter::G, 0),
        (Letter::G, 1),
        (Letter::A, 0),
        (Letter::A, 1),
        (Letter::B, 0),
    ];

    let (letter, accidental) = SPELLING[semitone.rem_euclid(12) as usize];
    Note::new(letter, accidental, semitone.div_euclid(12) - 1)
}

pub fn format_accidental(n: i32) -> String {
    match n {
        0 => String::new(),
        1 => "♯".to_string(),
        -1 => "♭".to_string(),
        2 => "𝄪".to_string(),
        -2 => "𝄫".to_string(),
        n if n > 0 => "#".repeat(n as usize),
        n => "b".repeat(n.unsigned_abs() as usize),
    }
}

pub fn format_note_label(note: &Note) -> String {
    note.to_string()
}

/// White-key pitch classes relative to C.
pub fn is_natural_semitone(semitone: i32) -> bool {
    matches!(semitone.rem_euclid(12), 0 | 2 | 4 | 5 | 7 | 9 | 11)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PitchOrder {
    pub low: Note,
    pub high: Note,
}

/// Orders two notes by pitch. Enharmonic ties keep the input order.
pub fn order_by_pitch(a: Note, b: Note) -> PitchOrder {
    if b.semitone() < a.semitone() {
        PitchOrder { low: b, high: a }
    } else {
        PitchOrder { low: a, high: b }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteParseError {
    #[error("Empty note name")]
    Empty,

    #[error("Unknown note letter '{0}'")]
    UnknownLetter(char),

    #[error("Invalid octave in note name: {0}")]
    InvalidOctave(String),
}

impl FromStr for Note {
    type Err = NoteParseError;

    /// Parses names like "C4", "F#3", "Bb", "E𝄫5". A missing octave means octave 4.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let first = chars.next().ok_or(NoteParseError::Empty)?;
        let letter = Letter::from_char(first).ok_or(NoteParseError::UnknownLetter(first))?;
        let rest = chars.as_str();

        let accidental_forms: [(&str, i8); 8] = [
            ("bb", -2),
            ("𝄫", -2),
            ("𝄪", 2),
            ("x", 2),
            ("#", 1),
            ("♯", 1),
            ("b", -1),
            ("♭", -1),
        ];

        let mut accidental = 0;
        let mut octave_str = rest;
        for (prefix, value) in accidental_forms {
            if let Some(stripped) = rest.strip_prefix(prefix) {
                accidental = value;
                octave_str = stripped;
                break;
            }
        }

        let octave = if octave_str.is_empty() {
            4
        } else {
            octave_str
                .parse()
                .map_err(|_| NoteParseError::InvalidOctave(s.to_string()))?
        };

        Ok(Note::new(letter, accidental, octave))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semitone_midi_numbering() {
        assert_eq!(Note::natural(Letter::C, 4).semitone(), 60);
        assert_eq!(Note::natural(Letter::A, 4).semitone(), 69);
        assert_eq!(Note::natural(Letter::E, 2).semitone(), 40);
        assert_eq!(Note::new(Letter::B, -1, 3).semitone(), 58);
        assert_eq!(Note::new(Letter::C, -1, 4).semitone(), 59);
        assert_eq!(Note::new(Letter::B, 1, 3).semitone(), 60);
    }

    #[test]
    fn test_semitone_extreme_octaves() {
        let high = Note::new(Letter::B, 2, i32::MAX);
        let low = Note::new(Letter::C, -2, i32::MIN);
        assert_eq!(high.semitone(), (i64::from(i32::MAX) + 1) * 12 + 13);
        assert_eq!(low.semitone(), (i64::from(i32::MIN) + 1) * 12 - 2);
        assert!(low.semitone() < high.semitone());
        assert_eq!(high.diatonic_index(), i64::from(i32::MAX) * 7 + 6);
        assert_eq!(
            order_by_pitch(high, low),
            PitchOrder { low, high }
        );
        assert_eq!(Note::from_diatonic_index(high.diatonic_index(), 0).octave, i32::MAX);
        assert_eq!(Note::from_diatonic_index(i64::MAX, 0).octave, i32::MAX);
    }

    #[test]
    fn test_diatonic_index_ignores_accidentals() {
        let c4 = Note::natural(Letter::C, 4);
        let c_sharp4 = Note::new(Letter::C, 1, 4);
        let d_flat4 = Note::new(Letter::D, -1, 4);
        assert_eq!(c4.diatonic_index(), c_sharp4.diatonic_index());
        assert_eq!(d_flat4.diatonic_index(), c4.diatonic_index() + 1);
        assert!(c_sharp4.is_pitch_equal(&d_flat4));
        assert_eq!(Note::natural(Letter::C, 5).diatonic_index() - c4.diatonic_index(), 7);
    }

    #[test]
    fn test_from_diatonic_index() {
        let b4 = Note::natural(Letter::B, 4);
        assert_eq!(Note::from_diatonic_index(b4.diatonic_index(), 0), b4);
        assert_eq!(
            Note::from_diatonic_index(b4.diatonic_index() + 1, -1),
            Note::new(Letter::C, -1, 5)
        );
    }

    #[test]
    fn test_spell_from_semitone_uses_sharps() {
        assert_eq!(spell_from_semitone(60), Note::natural(Letter::C, 4));
        assert_eq!(spell_from_semitone(61), Note::new(Letter::C, 1, 4));
        assert_eq!(spell_from_semitone(70), Note::new(Letter::A, 1, 4));
        assert_eq!(spell_from_semitone(64), Note::natural(Letter::E, 4));
        assert_eq!(spell_from_semitone(40), Note::natural(Letter::E, 2));
        assert_eq!(spell_from_semitone(-1), Note::natural(Letter::B, -2));
        for semi in 0..128 {
            let note = spell_from_semitone(semi);
            assert_eq!(note.semitone(), i64::from(semi));
            assert!(note.accidental == 0 || note.accidental == 1);
        }
    }

    #[test]
    fn test_format_accidental() {
        assert_eq!(format_accidental(0), "");
        assert_eq!(format_accidental(1), "♯");
        assert_eq!(format_accidental(-1), "♭");
        assert_eq!(format_accidental(2), "𝄪");
        assert_eq!(format_accidental(-2), "𝄫");
        assert_eq!(format_accidental(3), "###");
        assert_eq!(format_accidental(-4), "bbbb");
    }

    #[test]
    fn test_format_note_label() {
        assert_eq!(format_note_label(&Note::new(Letter::F, 1, 4)), "F♯4");
        assert_eq!(format_note_label(&Note::new(Letter::B, -1, 3)), "B♭3");
        assert_eq!(format_note_label(&Note::natural(Letter::C, 5)), "C5");
    }

    #[test]
    fn test_order_by_pitch() {
        let c4 = Note::natural(Letter::C, 4);
        let g4 = Note::natural(Letter::G, 4);
        assert_eq!(order_by_pitch(g4, c4), PitchOrder { low: c4, high: g4 });
        assert_eq!(order_by_pitch(c4, g4), PitchOrder { low: c4, high: g4 });

        // Enharmonic tie keeps input order
        let b_sharp3 = Note::new(Letter::B, 1, 3);
        assert_eq!(
            order_by_pitch(c4, b_sharp3),
            PitchOrder {
                low: c4,
                high: b_sharp3
            }
        );
        assert_eq!(
            order_by_pitch(b_sharp3, c4),
            PitchOrder {
                low: b_sharp3,
                high: c4
            }
        );
    }

    #[test]
    fn test_is_natural_semitone() {
        let naturals: Vec<i32> = (60..72).filter(|&s| is_natural_semitone(s)).collect();
        assert_eq!(naturals, vec![60, 62, 64, 65, 67, 69, 71]);
        assert!(is_natural_semitone(-12));
        assert!(!is_natural_semitone(-11));
    }

    #[test]
    fn test_parse_note() {
        assert_eq!("C4".parse::<Note>().unwrap(), Note::natural(Letter::C, 4));
        assert_eq!("F#3".parse::<Note>().unwrap(), Note::new(Letter::F, 1, 3));
        assert_eq!("Bb3".parse::<Note>().unwrap(), Note::new(Letter::B, -1, 3));
        assert_eq!("Ebb5".parse::<Note>().unwrap(), Note::new(Letter::E, -2, 5));
        assert_eq!("Gx2".parse::<Note>().unwrap(), Note::new(Letter::G, 2, 2));
        assert_eq!("A♭4".parse::<Note>().unwrap(), Note::new(Letter::A, -1, 4));
        assert_eq!("b".parse::<Note>().unwrap(), Note::natural(Letter::B, 4));
        assert_eq!("C-1".parse::<Note>().unwrap().semitone(), 0);
    }

    #[test]
    fn test_parse_note_errors() {
        assert_eq!("".parse::<Note>(), Err(NoteParseError::Empty));
        assert_eq!("H4".parse::<Note>(), Err(NoteParseError::UnknownLetter('H')));
        assert!(matches!(
            "C#four".parse::<Note>(),
            Err(NoteParseError::InvalidOctave(_))
        ));
    }
}
