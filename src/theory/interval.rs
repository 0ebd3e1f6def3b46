use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theory::note::Note;

/// Major/perfect reference sizes in semitones, indexed by interval number (index 0 unused).
const BASE_SEMITONES: [i64; 9] = [0, 0, 2, 4, 5, 7, 9, 11, 12];

pub const MIN_NUMBER: i64 = 1;
pub const MAX_NUMBER: i64 = 8;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quality {
    #[serde(rename = "d")]
    Diminished,
    #[serde(rename = "m")]
    Minor,
    #[serde(rename = "M")]
    Major,
    #[serde(rename = "P")]
    Perfect,
    #[serde(rename = "A")]
    Augmented,
}

impl Quality {
    /// Sort rank: d < m < M < P < A.
    pub fn rank(self) -> u8 {
        match self {
            Quality::Diminished => 0,
            Quality::Minor => 1,
            Quality::Major => 2,
            Quality::Perfect => 3,
            Quality::Augmented => 4,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Quality::Diminished => "d",
            Quality::Minor => "m",
            Quality::Major => "M",
            Quality::Perfect => "P",
            Quality::Augmented => "A",
        }
    }

    fn chinese(self) -> &'static str {
        match self {
            Quality::Perfect => "纯",
            Quality::Major => "大",
            Quality::Minor => "小",
            Quality::Augmented => "增",
            Quality::Diminished => "减",
        }
    }

    fn english(self) -> &'static str {
        match self {
            Quality::Perfect => "Perfect",
            Quality::Major => "Major",
            Quality::Minor => "Minor",
            Quality::Augmented => "Augmented",
            Quality::Diminished => "Diminished",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    pub number: u8,
    pub quality: Quality,
}

pub fn is_perfect_class(number: u8) -> bool {
    matches!(number, 1 | 4 | 5 | 8)
}

impl Interval {
    pub const fn new(number: u8, quality: Quality) -> Self {
        Interval { number, quality }
    }

    /// The unaltered quality for a number: P for 1/4/5/8, M otherwise.
    pub fn natural(number: u8) -> Self {
        let quality = if is_perfect_class(number) {
            Quality::Perfect
        } else {
            Quality::Major
        };
        Interval { number, quality }
    }

    pub fn is_perfect_class(&self) -> bool {
        is_perfect_class(self.number)
    }

    /// Short identifier such as "P5" or "m3".
    pub fn id(&self) -> String {
        format!("{}{}", self.quality.symbol(), self.number)
    }

    pub fn english_name(&self) -> String {
        let suffix = match self.number {
            1 => "Unison".to_string(),
            8 => "Octave".to_string(),
            2 => "2nd".to_string(),
            3 => "3rd".to_string(),
            n => format!("{}th", n),
        };
        format!("{} {}", self.quality.english(), suffix)
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number
            .cmp(&other.number)
            .then(self.quality.rank().cmp(&other.quality.rank()))
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.quality.symbol(), self.number)
    }
}

/// Display label used by the drill, e.g. "纯五度" for a perfect fifth.
pub fn format_interval_label(interval: &Interval) -> String {
    const NUMBER_WORDS: [&str; 9] = ["", "一", "二", "三", "四", "五", "六", "七", "八"];
    let number = NUMBER_WORDS
        .get(interval.number as usize)
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .unwrap_or_else(|| interval.number.to_string());
    format!("{}{}度", interval.quality.chinese(), number)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("Interval number {0} is outside 1..=8")]
    NumberOutOfRange(i64),
}

/// Count of letter steps from `low` to `high`, inclusive of both ends.
pub fn diatonic_number(low: &Note, high: &Note) -> i64 {
    high.diatonic_index() - low.diatonic_index() + 1
}

/// Quality from the semitone deviation against the major/perfect reference size.
/// Deviations beyond one augmented/diminished step clamp by sign.
pub fn quality_for(number: u8, semitone_span: i64) -> Result<Quality, IntervalError> {
    let expected = match BASE_SEMITONES.get(usize::from(number)) {
        Some(&base) if number >= 1 => base,
        _ => return Err(IntervalError::NumberOutOfRange(i64::from(number))),
    };
    let diff = semitone_span - expected;

    if is_perfect_class(number) {
        return Ok(match diff {
            0 => Quality::Perfect,
            1 => Quality::Augmented,
            -1 => Quality::Diminished,
            d if d > 0 => Quality::Augmented,
            _ => Quality::Diminished,
        });
    }

    Ok(match diff {
        0 => Quality::Major,
        -1 => Quality::Minor,
        1 => Quality::Augmented,
        -2 => Quality::Diminished,
        d if d > 0 => Quality::Augmented,
        _ => Quality::Diminished,
    })
}

/// Classifies the interval between two notes already ordered low to high.
pub fn classify_interval(low: &Note, high: &Note) -> Result<Interval, IntervalError> {
    let number = diatonic_number(low, high);
    if !(MIN_NUMBER..=MAX_NUMBER).contains(&number) {
        return Err(IntervalError::NumberOutOfRange(number));
    }
    let number = number as u8;
    let span = high.semitone() - low.semitone();
    Ok(Interval::new(number, quality_for(number, span)?))
}
