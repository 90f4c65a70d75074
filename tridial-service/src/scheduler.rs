//! Mode scheduling
//!
//! The scheduler owns the current mode and the handle of the task running
//! it. A press stops the running task (when the mode can be stopped) and
//! starts the task for the next mode. A clock or weather task must
//! acknowledge the stop before the next task is launched.
//!
//! Test mode is one-shot and never waited on. If the next press is already
//! queued, the following clock task may write before the test pattern does;
//! the pattern then stays on the dials until the clock's next tick.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use log::{debug, info};
use tridial_core::mode::Mode;
use tridial_protocol::PressEvent;

use crate::error::FatalError;

/// Stop request and acknowledgement for one mode task
///
/// Both halves latch: a stop requested before the task first waits is
/// still seen, and a task that finishes before anyone waits still counts
/// as finished.
pub struct ModeCancel {
    stop: Signal<CriticalSectionRawMutex, ()>,
    finished: Signal<CriticalSectionRawMutex, ()>,
}

impl ModeCancel {
    pub const fn new() -> Self {
        Self {
            stop: Signal::new(),
            finished: Signal::new(),
        }
    }

    /// Clear both halves before a new task takes this token
    pub fn reset(&self) {
        self.stop.reset();
        self.finished.reset();
    }

    /// Ask the task to stop
    pub fn request(&self) {
        self.stop.signal(());
    }

    /// Whether a stop has been requested and not yet observed
    #[cfg(test)]
    pub fn is_requested(&self) -> bool {
        self.stop.signaled()
    }

    /// Wait for a stop request
    pub async fn requested(&self) {
        self.stop.wait().await
    }

    /// Acknowledge that the task has stopped writing
    pub fn finish(&self) {
        self.finished.signal(());
    }

    /// Wait for the task to acknowledge
    pub async fn finished(&self) {
        self.finished.wait().await
    }
}

impl Default for ModeCancel {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a running mode task
pub struct ModeTaskHandle {
    mode: Mode,
    cancel: Option<&'static ModeCancel>,
}

impl ModeTaskHandle {
    /// Handle for a task that stops on request
    pub fn cancellable(mode: Mode, cancel: &'static ModeCancel) -> Self {
        debug_assert!(mode.supports_cancellation());
        Self {
            mode,
            cancel: Some(cancel),
        }
    }

    /// Handle for a one-shot task that is never stopped
    pub fn detached(mode: Mode) -> Self {
        debug_assert!(!mode.supports_cancellation());
        Self { mode, cancel: None }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Stop the task and wait until it has acknowledged
    async fn stop(&mut self) {
        if !self.mode.supports_cancellation() {
            return;
        }
        if let Some(cancel) = self.cancel.take() {
            debug!("stopping {} mode", self.mode);
            cancel.request();
            cancel.finished().await;
        }
    }
}

/// Starts the task for a mode
pub trait ModeLauncher {
    fn launch(&mut self, mode: Mode) -> Result<ModeTaskHandle, FatalError>;
}

/// Tracks the current mode and switches it on each press
pub struct ModeScheduler<L> {
    launcher: L,
    active: ModeTaskHandle,
}

impl<L: ModeLauncher> ModeScheduler<L> {
    /// Launch the initial mode (clock)
    pub fn start(mut launcher: L) -> Result<Self, FatalError> {
        let mode = Mode::default();
        info!("starting in {} mode", mode);
        let active = launcher.launch(mode)?;
        Ok(Self { launcher, active })
    }

    pub fn current(&self) -> Mode {
        self.active.mode()
    }

    /// Handle one debounced press
    ///
    /// Returns the mode that is current afterwards.
    pub async fn on_press(&mut self, press: PressEvent) -> Result<Mode, FatalError> {
        let from = self.current();
        let next = from.advance(press.delta());
        if next == from {
            return Ok(from);
        }

        self.active.stop().await;
        self.active = self.launcher.launch(next)?;
        info!("mode changed from {} to {}", from, next);
        Ok(next)
    }
}
