/// Aggregated view of answering progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub attempted: usize,
    pub total: usize,
    /// Rounded share of attempted questions, 0..=100.
    pub percent: u8,
}

impl QuizProgress {
    #[must_use]
    pub fn new(attempted: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0
        } else {
            let rounded = (attempted.min(total) * 100 + total / 2) / total;
            u8::try_from(rounded).unwrap_or(100)
        };
        Self {
            attempted,
            total,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(QuizProgress::new(0, 5).percent, 0);
        assert_eq!(QuizProgress::new(1, 3).percent, 33);
        assert_eq!(QuizProgress::new(2, 3).percent, 67);
        assert_eq!(QuizProgress::new(5, 5).percent, 100);
    }

    #[test]
    fn empty_set_is_zero_percent() {
        assert_eq!(QuizProgress::new(0, 0).percent, 0);
    }
}
