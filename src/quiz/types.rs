use serde::{Deserialize, Serialize};

use crate::theory::fretboard::FretPosition;
use crate::theory::interval::Interval;
use crate::theory::note::Note;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Staff,
    Tab,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Drill options chosen by the user.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub mode: Mode,
    pub allow_altered: bool,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabPositions {
    pub left: FretPosition,
    pub right: FretPosition,
}

/// One round of the drill. `answer` is classified on the low-to-high pair,
/// whatever order the notes are presented in.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub left: Note,
    pub right: Note,
    pub direction: Direction,
    pub answer: Interval,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tab: Option<TabPositions>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    /// The round was already solved.
    Ignored,
}

/// Snapshot of a session handed to the UI.
#[derive(Serialize, Clone, Debug)]
pub struct SessionState {
    pub settings: Settings,
    pub question: Question,
    pub choices: Vec<Interval>,
    pub locked: bool,
    pub total: u32,
    pub correct: u32,
    pub accuracy_percent: u32,
}
