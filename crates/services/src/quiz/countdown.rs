use std::time::Duration;

use reading_core::model::TickOutcome;
use tokio::time::{Instant, MissedTickBehavior};

use super::service::QuizService;
use super::view::QuizView;

/// Wall-clock period between timer ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Why the countdown loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownExit {
    /// The session stopped running (paused or left the timed stages).
    Stopped,
    /// The remaining time reached zero during this run.
    Expired,
}

/// Drive the session timer until it stops running.
///
/// Ticks once per `period`, handing every resulting snapshot to `on_tick`.
/// The loop never ticks a stopped session, so cancelling the future (for
/// example when the user pauses) is enough to stop the timer. A failed
/// snapshot write is logged and the loop carries on with the in-memory state.
pub async fn run_countdown<F>(service: &QuizService, period: Duration, mut on_tick: F) -> CountdownExit
where
    F: FnMut(&QuizView),
{
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        if !service.is_running().await {
            return CountdownExit::Stopped;
        }
        interval.tick().await;

        match service.tick().await {
            Ok(report) => {
                on_tick(&report.view);
                match report.outcome {
                    TickOutcome::Idle => return CountdownExit::Stopped,
                    TickOutcome::Ticked { .. } => {}
                    TickOutcome::Expired => return CountdownExit::Expired,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "countdown tick not persisted");
                let view = service.view().await;
                on_tick(&view);
                if view.expired {
                    return CountdownExit::Expired;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reading_core::model::{QuizContent, Stage};
    use storage::{DEFAULT_SLOT_KEY, InMemoryRepository, SessionSlot};

    use super::*;

    async fn service() -> QuizService {
        let slot = SessionSlot::new(Arc::new(InMemoryRepository::new()), DEFAULT_SLOT_KEY);
        QuizService::restore(Arc::new(QuizContent::cambridge_demo()), slot).await
    }

    #[tokio::test(start_paused = true)]
    async fn runs_to_expiry_exactly_once() {
        let svc = service().await;
        let mut seen = Vec::new();

        let exit = run_countdown(&svc, TICK_PERIOD, |view| seen.push(view.seconds_remaining)).await;

        assert_eq!(exit, CountdownExit::Expired);
        assert_eq!(seen.len(), 3600);
        assert_eq!(seen.first(), Some(&3599));
        assert_eq!(seen.last(), Some(&0));

        let view = svc.view().await;
        assert_eq!(view.stage, Stage::Reviewing);
        assert!(view.paused);
        assert!(view.review.is_some());

        let again = run_countdown(&svc, TICK_PERIOD, |_| panic!("no tick after expiry")).await;
        assert_eq!(again, CountdownExit::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn paused_session_does_not_tick() {
        let svc = service().await;
        svc.toggle_pause().await.unwrap();

        let exit = run_countdown(&svc, TICK_PERIOD, |_| panic!("paused")).await;
        assert_eq!(exit, CountdownExit::Stopped);
        assert_eq!(svc.view().await.seconds_remaining, 3600);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelling_the_future_stops_ticks() {
        let svc = service().await;
        let mut ticks = 0;

        let _ = tokio::time::timeout(
            Duration::from_millis(5_500),
            run_countdown(&svc, TICK_PERIOD, |_| ticks += 1),
        )
        .await;

        assert_eq!(ticks, 5);
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(svc.view().await.seconds_remaining, 3595);
    }
}
