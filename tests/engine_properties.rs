use interval_trainer::quiz::choices::{build_choice_set, MAX_CHOICES};
use interval_trainer::quiz::generators::{generate_staff_question, generate_tab_question};
use interval_trainer::theory::fretboard::{
    best_position, position_to_note, position_to_semitone, FretPosition, MAX_FRET,
};
use interval_trainer::theory::interval::{classify_interval, Interval, Quality};
use interval_trainer::theory::note::{order_by_pitch, spell_from_semitone, Letter, Note, LETTERS};
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn all_notes() -> Vec<Note> {
    let mut notes = Vec::new();
    for octave in 3..=5 {
        for letter in LETTERS {
            for accidental in -2..=2 {
                notes.push(Note::new(letter, accidental, octave));
            }
        }
    }
    notes
}

#[test]
fn classification_is_symmetric() {
    let notes = all_notes();
    for a in &notes {
        for b in &notes {
            if a.semitone() == b.semitone() {
                continue;
            }
            let forward = order_by_pitch(*a, *b);
            let backward = order_by_pitch(*b, *a);
            assert_eq!(
                classify_interval(&forward.low, &forward.high),
                classify_interval(&backward.low, &backward.high),
                "{} / {}",
                a,
                b
            );
        }
    }
}

#[test]
fn concrete_scenarios() {
    let c4 = Note::natural(Letter::C, 4);
    let g4 = Note::natural(Letter::G, 4);
    let f_sharp4 = Note::new(Letter::F, 1, 4);
    assert_eq!(
        classify_interval(&c4, &g4),
        Ok(Interval::new(5, Quality::Perfect))
    );
    assert_eq!(
        classify_interval(&c4, &f_sharp4),
        Ok(Interval::new(4, Quality::Augmented))
    );
    assert_eq!(
        best_position(&Note::natural(Letter::E, 4)),
        Some(FretPosition::new(1, 0))
    );
}

#[test]
fn fretboard_round_trip_keeps_pitch() {
    for string in 1..=6u8 {
        for fret in 0..=MAX_FRET {
            let pos = FretPosition::new(string, fret);
            let semitone = position_to_semitone(&pos).unwrap();
            let note = spell_from_semitone(semitone);
            assert_eq!(position_to_note(&pos), Some(note));
            let best = best_position(&note).expect("pitch reachable from a real position");
            assert_eq!(position_to_semitone(&best), Some(semitone));
        }
    }
}

#[test]
fn choice_sets_never_offer_diminished_unison() {
    let mut rng = Pcg32::seed_from_u64(3);
    let diminished_unison = Interval::new(1, Quality::Diminished);
    for _ in 0..2000 {
        for allow_altered in [false, true] {
            let question = generate_staff_question(allow_altered, &mut rng);
            let choices = build_choice_set(question.answer, allow_altered, &mut rng);
            assert!(!choices.contains(&diminished_unison));
            assert!(choices.contains(&question.answer));
            assert!(choices.len() <= MAX_CHOICES);
            assert!(choices.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[test]
fn natural_mode_never_produces_accidentals() {
    let mut rng = Pcg32::seed_from_u64(11);
    for _ in 0..10_000 {
        let staff = generate_staff_question(false, &mut rng);
        assert_eq!(staff.left.accidental, 0);
        assert_eq!(staff.right.accidental, 0);

        let tab = generate_tab_question(false, &mut rng);
        assert_eq!(tab.left.accidental, 0, "{:?}", tab);
        assert_eq!(tab.right.accidental, 0, "{:?}", tab);
    }
}

#[test]
fn natural_staff_questions_only_use_common_qualities() {
    let tritones = [
        Interval::new(4, Quality::Augmented),
        Interval::new(5, Quality::Diminished),
    ];
    let mut rng = Pcg32::seed_from_u64(5);
    for _ in 0..10_000 {
        let question = generate_staff_question(false, &mut rng);
        let answer = question.answer;
        assert!((1..=8).contains(&answer.number));
        assert!(
            matches!(
                answer.quality,
                Quality::Minor | Quality::Major | Quality::Perfect
            ) || tritones.contains(&answer),
            "unexpected {}",
            answer
        );
    }
}

#[test]
fn generated_answers_agree_with_classifier() {
    let mut rng = Pcg32::seed_from_u64(9);
    for _ in 0..5000 {
        for question in [
            generate_staff_question(true, &mut rng),
            generate_tab_question(true, &mut rng),
        ] {
            let ordered = order_by_pitch(question.left, question.right);
            if ordered.low.semitone() == ordered.high.semitone() {
                continue;
            }
            assert_eq!(
                classify_interval(&ordered.low, &ordered.high),
                Ok(question.answer)
            );
        }
    }
}
