use log::{debug, info};
use rand::Rng;

use crate::quiz::choices::build_choice_set;
use crate::quiz::generators::generate_question;
use crate::quiz::types::{AnswerOutcome, Mode, Question, SessionState, Settings};
use crate::theory::interval::{format_interval_label, Interval};

/// One user's drill: the current round, its choices and the running score.
pub struct Session<R: Rng> {
    settings: Settings,
    rng: R,
    question: Question,
    choices: Vec<Interval>,
    locked: bool,
    total: u32,
    correct: u32,
}

impl<R: Rng> Session<R> {
    /// Starts a session with its first round already generated.
    pub fn new(settings: Settings, mut rng: R) -> Self {
        let question = generate_question(&settings, &mut rng);
        let choices = build_choice_set(question.answer, settings.allow_altered, &mut rng);
        Session {
            settings,
            rng,
            question,
            choices,
            locked: false,
            total: 0,
            correct: 0,
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn choices(&self) -> &[Interval] {
        &self.choices
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn accuracy_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct as f64 / self.total as f64 * 100.0).round() as u32
    }

    pub fn next_question(&mut self) -> &Question {
        self.question = generate_question(&self.settings, &mut self.rng);
        self.choices = build_choice_set(
            self.question.answer,
            self.settings.allow_altered,
            &mut self.rng,
        );
        self.locked = false;
        debug!(
            "new question {} -> {} ({})",
            self.question.left, self.question.right, self.question.answer
        );
        &self.question
    }

    /// Scores a guess. A correct guess locks the round until the next
    /// question; a wrong one leaves it open for another try.
    pub fn answer(&mut self, selected: &Interval) -> AnswerOutcome {
        if self.locked {
            return AnswerOutcome::Ignored;
        }

        self.total += 1;
        if *selected == self.question.answer {
            self.correct += 1;
            self.locked = true;
            debug!("answered {} correctly", selected);
            AnswerOutcome::Correct
        } else {
            debug!("answered {}, expected {}", selected, self.question.answer);
            AnswerOutcome::Incorrect
        }
    }

    /// Answers with the choice at `index` (0-based). `None` when there is no such choice.
    pub fn answer_index(&mut self, index: usize) -> Option<AnswerOutcome> {
        let selected = *self.choices.get(index)?;
        Some(self.answer(&selected))
    }

    /// Note names and the correct label, e.g. "C4 → G4 = 纯五度".
    pub fn feedback(&self) -> String {
        format!(
            "{} → {} = {}",
            self.question.left,
            self.question.right,
            format_interval_label(&self.question.answer)
        )
    }

    /// Feedback for a guess. A wrong guess names both intervals, e.g.
    /// "你选了 大三度；正确是 纯四度（C4 → F4）".
    pub fn feedback_for(&self, selected: &Interval) -> String {
        if *selected == self.question.answer {
            return self.feedback();
        }
        format!(
            "你选了 {}；正确是 {}（{} → {}）",
            format_interval_label(selected),
            format_interval_label(&self.question.answer),
            self.question.left,
            self.question.right
        )
    }

    /// Shows the answer without touching the score.
    pub fn reveal(&self) -> String {
        self.feedback()
    }

    pub fn reset(&mut self) {
        info!("resetting score after {} answers", self.total);
        self.total = 0;
        self.correct = 0;
        self.next_question();
    }

    pub fn set_mode(&mut self, mode: Mode) {
        info!("switching mode to {:?}", mode);
        self.settings.mode = mode;
        self.next_question();
    }

    pub fn set_allow_altered(&mut self, allow_altered: bool) {
        info!("altered notes {}", if allow_altered { "on" } else { "off" });
        self.settings.allow_altered = allow_altered;
        self.next_question();
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            settings: self.settings,
            question: self.question.clone(),
            choices: self.choices.clone(),
            locked: self.locked,
            total: self.total,
            correct: self.correct,
            accuracy_percent: self.accuracy_percent(),
        }
    }
}
