use rand::Rng;

use crate::theory::interval::{is_perfect_class, Interval, Quality};

pub const MAX_CHOICES: usize = 9;

const NATURAL_COMMON: [Interval; 14] = [
    Interval::new(1, Quality::Perfect),
    Interval::new(2, Quality::Minor),
    Interval::new(2, Quality::Major),
    Interval::new(3, Quality::Minor),
    Interval::new(3, Quality::Major),
    Interval::new(4, Quality::Perfect),
    Interval::new(4, Quality::Augmented),
    Interval::new(5, Quality::Diminished),
    Interval::new(5, Quality::Perfect),
    Interval::new(6, Quality::Minor),
    Interval::new(6, Quality::Major),
    Interval::new(7, Quality::Minor),
    Interval::new(7, Quality::Major),
    Interval::new(8, Quality::Perfect),
];

const ALTERED_COMMON: [Interval; 8] = [
    Interval::new(2, Quality::Augmented),
    Interval::new(2, Quality::Diminished),
    Interval::new(3, Quality::Augmented),
    Interval::new(3, Quality::Diminished),
    Interval::new(6, Quality::Augmented),
    Interval::new(6, Quality::Diminished),
    Interval::new(7, Quality::Augmented),
    Interval::new(7, Quality::Diminished),
];

/// A diminished unison never appears as a choice.
fn is_excluded(interval: &Interval) -> bool {
    interval.number == 1 && interval.quality == Quality::Diminished
}

/// Alternates sharing the correct answer's number.
fn same_number_alternates(number: u8, allow_altered: bool) -> Vec<Interval> {
    let mut alternates = Vec::new();
    if is_perfect_class(number) {
        alternates.push(Interval::new(number, Quality::Perfect));
        if allow_altered {
            alternates.push(Interval::new(number, Quality::Diminished));
            alternates.push(Interval::new(number, Quality::Augmented));
        } else if number == 4 {
            alternates.push(Interval::new(4, Quality::Augmented));
        } else if number == 5 {
            alternates.push(Interval::new(5, Quality::Diminished));
        }
    } else {
        alternates.push(Interval::new(number, Quality::Minor));
        alternates.push(Interval::new(number, Quality::Major));
        if allow_altered {
            alternates.push(Interval::new(number, Quality::Diminished));
            alternates.push(Interval::new(number, Quality::Augmented));
        }
    }
    alternates
}

/// Builds the sorted answer choices for a question: the correct interval, its
/// same-number alternates, the natural neighbours, then common intervals up to
/// nine entries. Earlier candidates win over later duplicates.
pub fn build_choice_set<R: Rng + ?Sized>(
    correct: Interval,
    allow_altered: bool,
    rng: &mut R,
) -> Vec<Interval> {
    let mut choices: Vec<Interval> = Vec::with_capacity(MAX_CHOICES);
    if !is_excluded(&correct) {
        choices.push(correct);
    }

    let number = correct.number;
    let mut candidates = same_number_alternates(number, allow_altered);
    if number > 1 {
        candidates.push(Interval::natural(number - 1));
    }
    if number < 8 {
        candidates.push(Interval::natural(number + 1));
    }

    for candidate in candidates {
        if !is_excluded(&candidate) && !choices.contains(&candidate) {
            choices.push(candidate);
        }
    }

    let altered_pool: &[Interval] = if allow_altered { &ALTERED_COMMON } else { &[] };
    for candidate in NATURAL_COMMON.iter().chain(altered_pool) {
        if choices.len() >= MAX_CHOICES {
            break;
        }
        if !is_excluded(candidate) && !choices.contains(candidate) {
            choices.push(*candidate);
        }
    }

    while choices.len() > MAX_CHOICES {
        let idx = rng.gen_range(0..choices.len());
        choices.remove(idx);
    }

    choices.sort();
    choices
}
