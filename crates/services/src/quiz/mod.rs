mod countdown;
mod progress;
mod service;
mod view;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use countdown::{CountdownExit, TICK_PERIOD, run_countdown};
pub use progress::QuizProgress;
pub use service::{QuizService, TickReport};
pub use view::QuizView;
