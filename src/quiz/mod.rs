pub mod choices;
pub mod generators;
pub mod session;
pub mod types;
