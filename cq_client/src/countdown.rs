//! Wall-clock countdown backed by a tokio task.

use country_quiz::timer::Countdown;
use std::time::Duration;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

/// Time between ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Sends `()` on its channel once per period while active.
///
/// At most one ticking task exists at a time; [`Countdown::stop`] and drop
/// abort it. Must be started from within a tokio runtime.
#[derive(Debug)]
pub struct TokioCountdown {
    tx: mpsc::UnboundedSender<()>,
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl TokioCountdown {
    /// Create a stopped countdown and the receiver its ticks arrive on.
    #[must_use]
    pub fn new(period: Duration) -> (Self, mpsc::UnboundedReceiver<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let countdown = Self {
            tx,
            period,
            handle: None,
        };
        (countdown, rx)
    }
}

impl Countdown for TokioCountdown {
    fn start(&mut self) {
        if self.is_active() {
            return;
        }

        let tx = self.tx.clone();
        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    fn is_active(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for TokioCountdown {
    fn drop(&mut self) {
        self.stop();
    }
}
