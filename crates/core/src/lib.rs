#![forbid(unsafe_code)]

pub mod model;
pub mod scoring;
pub mod timer;

pub use scoring::{Band, QuestionOutcome, ScoreResult, band, score};
pub use timer::{Countdown, CountdownStep, DEFAULT_DURATION_SECS, format_clock};
