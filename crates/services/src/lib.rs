#![forbid(unsafe_code)]

pub mod app_services;
pub mod content_loader;
pub mod error;
pub mod quiz;

pub use app_services::AppServices;
pub use content_loader::{load_content_file, parse_content};
pub use error::{AppServicesError, ContentLoadError, QuizError};
pub use quiz::{
    CountdownExit, QuizProgress, QuizService, QuizView, TICK_PERIOD, TickReport, run_countdown,
};
