/// Default attempt length: the 60-minute IELTS reading module.
pub const DEFAULT_DURATION_SECS: u32 = 60 * 60;

/// Result of advancing a [`Countdown`] by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// Still time left after the step.
    Running { remaining: u32 },
    /// This step moved the countdown from one to zero.
    ReachedZero,
    /// Already at zero before the step; nothing changed.
    Exhausted,
}

/// Remaining seconds of an attempt, floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    #[must_use]
    pub const fn new(remaining: u32) -> Self {
        Self { remaining }
    }

    #[must_use]
    pub const fn remaining(self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub const fn is_exhausted(self) -> bool {
        self.remaining == 0
    }

    pub fn step(&mut self) -> CountdownStep {
        match self.remaining {
            0 => CountdownStep::Exhausted,
            1 => {
                self.remaining = 0;
                CountdownStep::ReachedZero
            }
            n => {
                self.remaining = n - 1;
                CountdownStep::Running {
                    remaining: self.remaining,
                }
            }
        }
    }
}

/// Format seconds as `MM:SS`. Minutes widen past two digits only when needed.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes:02}:{remainder:02}")
}
