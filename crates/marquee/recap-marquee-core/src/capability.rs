//! Bounded acquisition of a host capability that may appear late (e.g. a
//! gesture library injected by another script).
//!
//! The host owns the timer: it calls [`CapabilityProbe::attempt`] every
//! `interval_ms` until the probe settles. Exhaustion tells the host to
//! substitute its fallback. Cancelling (unmount) makes every later attempt a
//! no-op, so a timer that fires after teardown is harmless.

use crate::config::ProbeConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeStep<C> {
    Acquired(C),
    /// Not yet available; try again after `interval_ms`.
    Retry,
    /// Last attempt failed; use the fallback.
    Exhausted,
    /// Already settled or cancelled; the acquire closure was not called.
    Inactive,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProbeState {
    Pending,
    Acquired,
    Exhausted,
    Cancelled,
}

#[derive(Clone, Debug)]
pub struct CapabilityProbe {
    cfg: ProbeConfig,
    attempts: u32,
    state: ProbeState,
}

impl CapabilityProbe {
    pub fn new(cfg: ProbeConfig) -> Self {
        Self {
            cfg,
            attempts: 0,
            state: ProbeState::Pending,
        }
    }

    #[inline]
    pub fn interval_ms(&self) -> u32 {
        self.cfg.interval_ms
    }

    #[inline]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[inline]
    pub fn state(&self) -> ProbeState {
        self.state
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.state == ProbeState::Pending
    }

    pub fn attempt<C>(&mut self, acquire: impl FnOnce() -> Option<C>) -> ProbeStep<C> {
        if !self.is_pending() {
            return ProbeStep::Inactive;
        }
        self.attempts += 1;
        if let Some(cap) = acquire() {
            self.state = ProbeState::Acquired;
            log::debug!("capability acquired after {} attempt(s)", self.attempts);
            return ProbeStep::Acquired(cap);
        }
        if self.attempts >= self.cfg.max_attempts {
            self.state = ProbeState::Exhausted;
            log::warn!(
                "capability unavailable after {} attempts; using fallback",
                self.attempts
            );
            return ProbeStep::Exhausted;
        }
        ProbeStep::Retry
    }

    pub fn cancel(&mut self) {
        if self.is_pending() {
            self.state = ProbeState::Cancelled;
        }
    }
}
