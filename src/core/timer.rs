use crate::domain::model::{Phase, RoundId};
use crate::domain::ports::{TickHandle, TickScheduler};
use std::time::Duration;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    /// A second went by, nothing else to do.
    Elapsed,
    /// Interval boundary reached while the round is still running.
    ForcedMissCheck,
    RoundEnded,
}

/// Countdown for one round: `Idle -> Running -> Ended`.
///
/// The timer's phase is the round lifecycle. `RoundState::phase` is only a copy the
/// controller refreshes after each transition.
///
/// The timer owns the scheduled tick stream. Starting again, stopping, finishing
/// the countdown or dropping the timer all cancel the previous stream, so at most
/// one stream is ever live.
pub struct RoundTimer<S: TickScheduler> {
    scheduler: S,
    handle: Option<S::Handle>,
    phase: Phase,
    time_remaining: u32,
    forced_miss_interval: u32,
}

impl<S: TickScheduler> RoundTimer<S> {
    pub fn new(scheduler: S, forced_miss_interval: u32) -> Self {
        Self {
            scheduler,
            handle: None,
            phase: Phase::Idle,
            time_remaining: 0,
            forced_miss_interval,
        }
    }

    pub fn start(&mut self, round: RoundId, duration_seconds: u32) {
        self.cancel_ticks();
        self.time_remaining = duration_seconds;
        self.phase = Phase::Running;
        self.handle = Some(self.scheduler.schedule(round, TICK_PERIOD));
    }

    /// `None` when the timer is not running, so late ticks are harmless.
    pub fn tick(&mut self) -> Option<TimerSignal> {
        if self.phase != Phase::Running {
            return None;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);

        if self.time_remaining == 0 {
            self.cancel_ticks();
            self.phase = Phase::Ended;
            Some(TimerSignal::RoundEnded)
        } else if self.forced_miss_interval > 0
            && self.time_remaining % self.forced_miss_interval == 0
        {
            Some(TimerSignal::ForcedMissCheck)
        } else {
            Some(TimerSignal::Elapsed)
        }
    }

    /// Ends the round early with a final score: cancels ticks and moves to `Ended`.
    pub fn finish(&mut self) {
        self.cancel_ticks();
        if self.phase == Phase::Running {
            self.phase = Phase::Ended;
        }
    }

    /// Halts ticking before the countdown ends and returns to `Idle`.
    pub fn stop(&mut self) {
        self.cancel_ticks();
        if self.phase == Phase::Running {
            self.phase = Phase::Idle;
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn is_ticking(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| h.is_active())
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn cancel_ticks(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.cancel();
        }
    }
}

impl<S: TickScheduler> Drop for RoundTimer<S> {
    fn drop(&mut self) {
        self.cancel_ticks();
    }
}
