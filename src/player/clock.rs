//! Periodic clock task that drives simulated playback

use crate::app::events::{Event, PlayerEvent};
use std::time::Duration;
use tokio::{sync::mpsc, task::JoinHandle, time::MissedTickBehavior};

/// Running clock; dropping it stops the ticks.
#[derive(Debug)]
pub struct ClockHandle {
    epoch: u64,
    task: JoinHandle<()>,
}

impl ClockHandle {
    /// Emit `PlayerEvent::Tick { epoch }` every `period`, first one after one period.
    pub fn start(tx: mpsc::Sender<Event>, epoch: u64, period: Duration) -> Self {
        let task = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Event::Player(PlayerEvent::Tick { epoch })).await.is_err() {
                    break;
                }
            }
        });
        tracing::debug!(epoch, ?period, "clock started");
        Self { epoch, task }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Drop for ClockHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticks_carry_epoch() {
        let (tx, mut rx) = mpsc::channel(8);
        let clock = ClockHandle::start(tx, 7, Duration::from_millis(10));
        assert_eq!(clock.epoch(), 7);

        for _ in 0..3 {
            match rx.recv().await {
                Some(Event::Player(PlayerEvent::Tick { epoch })) => assert_eq!(epoch, 7),
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_drop_stops_ticks() {
        let (tx, mut rx) = mpsc::channel(8);
        let clock = ClockHandle::start(tx, 1, Duration::from_millis(10));
        drop(clock);
        // The task owned the only sender; once aborted the channel closes.
        let next = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(matches!(next, Ok(None)));
    }
}
