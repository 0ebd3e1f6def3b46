pub mod fretboard;
pub mod interval;
pub mod note;
