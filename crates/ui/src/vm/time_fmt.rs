use services::QuizView;

/// Status word shown next to the clock.
#[must_use]
pub fn timer_status(view: &QuizView) -> &'static str {
    if view.expired {
        "Time is up"
    } else if view.running {
        "Time left"
    } else if view.paused {
        "Paused"
    } else {
        "Stopped"
    }
}

/// CSS modifier for the timer badge.
#[must_use]
pub fn timer_class(view: &QuizView) -> &'static str {
    if view.expired {
        "quiz-timer quiz-timer--expired"
    } else if view.seconds_remaining <= 5 * 60 {
        "quiz-timer quiz-timer--low"
    } else {
        "quiz-timer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reading_core::model::{QuizContent, Session};

    #[test]
    fn fresh_session_is_counting_down() {
        let content = QuizContent::cambridge_demo();
        let view = QuizView::from_session(&Session::new(3600), &content);
        assert_eq!(timer_status(&view), "Time left");
        assert_eq!(timer_class(&view), "quiz-timer");
    }

    #[test]
    fn paused_and_low_time_are_flagged() {
        let content = QuizContent::cambridge_demo();
        let mut session = Session::new(120);
        session.toggle_pause();
        let view = QuizView::from_session(&session, &content);
        assert_eq!(timer_status(&view), "Paused");
        assert_eq!(timer_class(&view), "quiz-timer quiz-timer--low");
    }
}
