//! Frame pacing with an explicit stop contract.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use cosmic_core::AnimationSpeed;

/// Lifecycle of an [`AnimationLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Created but no frame requested yet.
    Idle,
    Running,
    /// Stopped for good.
    Stopped,
}

/// Cloneable handle that stops the loop it came from.
#[derive(Debug, Clone)]
pub struct StopHandle {
    stopped: Arc<RwLock<bool>>,
}

impl StopHandle {
    /// Request the loop to stop. Idempotent.
    pub fn stop(&self) {
        if let Ok(mut stopped) = self.stopped.write() {
            *stopped = true;
        }
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stopped.read().map(|stopped| *stopped).unwrap_or(true)
    }
}

/// Schedules frames at a fixed cadence.
///
/// The loop never blocks: callers poll [`AnimationLoop::frame_due`] and use
/// [`AnimationLoop::time_until_next_frame`] as their input-poll timeout.
#[derive(Debug)]
pub struct AnimationLoop {
    state: LoopState,
    interval: Duration,
    next_frame: Option<Instant>,
    stopped: Arc<RwLock<bool>>,
}

impl AnimationLoop {
    pub fn new(speed: AnimationSpeed) -> Self {
        Self {
            state: LoopState::Idle,
            interval: speed.frame_interval(),
            next_frame: None,
            stopped: Arc::new(RwLock::new(false)),
        }
    }

    /// Start the loop; the first frame is due immediately.
    pub fn start(&mut self, now: Instant) {
        if self.state() != LoopState::Idle {
            return;
        }
        self.state = LoopState::Running;
        self.next_frame = Some(now);
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            stopped: self.stopped.clone(),
        }
    }

    /// Current state, folding in stop requests made through handles.
    pub fn state(&self) -> LoopState {
        if self.stop_handle().is_stopped() {
            LoopState::Stopped
        } else {
            self.state
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == LoopState::Running
    }

    /// Change the cadence; takes effect from the next scheduled frame.
    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.interval = speed.frame_interval();
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True when a frame should be rendered now, at most once per interval.
    ///
    /// A late frame reschedules from `now` rather than bursting to catch up.
    pub fn frame_due(&mut self, now: Instant) -> bool {
        if !self.is_running() {
            return false;
        }
        match self.next_frame {
            Some(due) if now >= due => {
                let next = due + self.interval;
                self.next_frame = Some(if next <= now { now + self.interval } else { next });
                true
            }
            _ => false,
        }
    }

    /// Time left before the next frame is due; zero when overdue.
    pub fn time_until_next_frame(&self, now: Instant) -> Duration {
        if !self.is_running() {
            return self.interval;
        }
        self.next_frame
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }
}
