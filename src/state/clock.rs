use crate::state::messages::UiEvent;
use chrono::Utc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Countdowns only show minutes, so once a minute is enough.
pub const CLOCK_PERIOD: Duration = Duration::from_secs(60);

/// Owns the refresh tick. The only place that reads the wall clock after
/// startup; everything downstream receives `now` as a value.
pub struct ClockTicker {
    ui_events: mpsc::Sender<UiEvent>,
    period: Duration,
}

impl ClockTicker {
    pub fn new(ui_events: mpsc::Sender<UiEvent>) -> Self {
        Self::with_period(ui_events, CLOCK_PERIOD)
    }

    pub fn with_period(ui_events: mpsc::Sender<UiEvent>, period: Duration) -> Self {
        Self { ui_events, period }
    }

    pub async fn run(self) {
        let mut ticks = interval(self.period);
        // Skip the immediate first tick; the app snapshots `now` at startup.
        ticks.tick().await;

        loop {
            ticks.tick().await;
            let tick = UiEvent::ClockTick { now: Utc::now() };
            if self.ui_events.send(tick).await.is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sends_clock_ticks_with_increasing_now() {
        let (tx, mut rx) = mpsc::channel(4);
        let task = tokio::spawn(ClockTicker::with_period(tx, Duration::from_millis(5)).run());

        let first = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        let second = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        task.abort();

        let (Ok(Some(UiEvent::ClockTick { now: a })), Ok(Some(UiEvent::ClockTick { now: b }))) =
            (first, second)
        else {
            panic!("expected two clock ticks");
        };
        assert!(a <= b);
    }

    #[tokio::test]
    async fn stops_when_ui_loop_is_gone() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let task = tokio::spawn(ClockTicker::with_period(tx, Duration::from_millis(1)).run());
        let finished = tokio::time::timeout(Duration::from_secs(2), task).await;
        assert!(finished.is_ok(), "ticker should exit once the receiver is dropped");
    }
}
