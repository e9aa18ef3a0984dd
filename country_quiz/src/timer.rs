//! The session's single countdown.
//!
//! The controller is the only caller of [`Countdown`]: it starts the
//! countdown when the session enters a running phase and stops it on
//! pause, reset, game over and teardown. Implementations produce one
//! [`UiEvent::Tick`](crate::controller::UiEvent::Tick) per second while
//! active.

/// A cancellable once-per-second tick source
pub trait Countdown {
    /// Begin ticking. Calling this while active must not create a second
    /// tick source.
    fn start(&mut self);

    /// Cancel the tick source, if any.
    fn stop(&mut self);

    fn is_active(&self) -> bool;
}

impl<T: Countdown + ?Sized> Countdown for Box<T> {
    fn start(&mut self) {
        (**self).start();
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}

/// Countdown driven by hand; ticks are fed to the controller explicitly.
#[derive(Debug, Default)]
pub struct ManualCountdown {
    active: bool,
    /// Times the countdown went from stopped to started
    pub starts: usize,
    /// Times the countdown went from started to stopped
    pub stops: usize,
}

impl ManualCountdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Countdown for ManualCountdown {
    fn start(&mut self) {
        if !self.active {
            self.active = true;
            self.starts += 1;
        }
    }

    fn stop(&mut self) {
        if self.active {
            self.active = false;
            self.stops += 1;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
