//! Play/pause state machine and the elapsed-time gate that limits
//! automatic stepping to the configured rate.
//!
//! Timestamps are [`Duration`]s measured from any monotonic epoch the host
//! chooses (frame clock, `Instant` offset, simulated test clock).

use crate::error::{EngineError, Result};
use std::time::Duration;

/// Step interval for `rate`, or None when `1 / rate` is not a representable `Duration`
pub(crate) fn interval_for_rate(rate: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(1.0 / rate).ok()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PacingState {
    #[default]
    Paused,
    Running,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PacingController {
    state: PacingState,
    steps_per_second: f64,
    min_rate: f64,
    max_rate: f64,
    last_step: Duration,
}

impl PacingController {
    /// Paused controller whose gate starts counting at `now`.
    /// Bounds must already be validated; the rate is clamped into them.
    pub fn new(rate: f64, min_rate: f64, max_rate: f64, now: Duration) -> Result<Self> {
        if !min_rate.is_finite() || min_rate <= 0.0 || !max_rate.is_finite() || max_rate < min_rate {
            return Err(EngineError::InvalidConfig("rate bounds must be positive and ordered"));
        }
        if interval_for_rate(min_rate).is_none() {
            return Err(EngineError::InvalidConfig("min_rate is too small for a step interval"));
        }
        let mut controller = Self {
            state: PacingState::Paused,
            steps_per_second: min_rate,
            min_rate,
            max_rate,
            last_step: now,
        };
        controller.set_rate(rate)?;
        Ok(controller)
    }

    pub fn state(&self) -> PacingState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PacingState::Running
    }

    pub fn play(&mut self) {
        self.state = PacingState::Running;
    }

    pub fn pause(&mut self) {
        self.state = PacingState::Paused;
    }

    pub fn toggle(&mut self) -> PacingState {
        self.state = match self.state {
            PacingState::Paused => PacingState::Running,
            PacingState::Running => PacingState::Paused,
        };
        self.state
    }

    pub fn rate(&self) -> f64 {
        self.steps_per_second
    }

    pub fn rate_bounds(&self) -> (f64, f64) {
        (self.min_rate, self.max_rate)
    }

    /// Minimum time between two automatic steps
    pub fn interval(&self) -> Duration {
        interval_for_rate(self.steps_per_second).unwrap_or(Duration::MAX)
    }

    pub fn last_step(&self) -> Duration {
        self.last_step
    }

    /// Set the rate, clamped into the configured bounds. Non-finite and
    /// non-positive rates are rejected and leave the current rate in place.
    /// Returns the rate actually applied.
    pub fn set_rate(&mut self, rate: f64) -> Result<f64> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(EngineError::InvalidRate { rate });
        }
        let clamped = rate.clamp(self.min_rate, self.max_rate);
        if clamped != rate {
            log::warn!(
                "requested rate {rate} outside [{}, {}], using {clamped}",
                self.min_rate,
                self.max_rate
            );
        }
        self.steps_per_second = clamped;
        Ok(clamped)
    }

    /// Nudge the rate by `delta`, saturating at the bounds
    pub fn adjust_rate(&mut self, delta: f64) -> f64 {
        if delta.is_finite() {
            self.steps_per_second = (self.steps_per_second + delta).clamp(self.min_rate, self.max_rate);
        }
        self.steps_per_second
    }

    /// Pacing gate. Returns true (and restarts the interval at `now`) when
    /// running and at least one interval has elapsed since the last step.
    pub fn should_step(&mut self, now: Duration) -> bool {
        if !self.is_running() {
            return false;
        }
        let elapsed = now.saturating_sub(self.last_step);
        if elapsed >= self.interval() {
            self.last_step = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn controller(rate: f64) -> PacingController {
        PacingController::new(rate, 0.1, 60.0, Duration::ZERO).unwrap()
    }

    #[test]
    fn test_starts_paused() {
        let pacing = controller(5.0);
        assert_eq!(pacing.state(), PacingState::Paused);
        assert_eq!(pacing.last_step(), Duration::ZERO);
        assert_eq!(pacing.interval(), ms(200));
    }

    #[test]
    fn test_paused_never_steps() {
        let mut pacing = controller(5.0);
        assert!(!pacing.should_step(ms(10_000)));
        assert!(!pacing.should_step(Duration::from_secs(3600)));
        assert_eq!(pacing.last_step(), Duration::ZERO);
    }

    #[test]
    fn test_gate_threshold() {
        let mut pacing = controller(4.0);
        pacing.play();
        assert!(!pacing.should_step(ms(249)));
        assert!(pacing.should_step(ms(250)));
        assert_eq!(pacing.last_step(), ms(250));
        assert!(!pacing.should_step(ms(251)));
        assert!(!pacing.should_step(ms(499)));
        assert!(pacing.should_step(ms(501)));
        assert_eq!(pacing.last_step(), ms(501));
    }

    #[test]
    fn test_slow_host_steps_once_per_tick() {
        let mut pacing = controller(10.0);
        pacing.play();
        // One tick after a long stall yields one step, not a burst.
        assert!(pacing.should_step(ms(5_000)));
        assert!(!pacing.should_step(ms(5_050)));
    }

    #[test]
    fn test_clock_going_backwards_does_not_step() {
        let mut pacing = PacingController::new(10.0, 0.1, 60.0, ms(1_000)).unwrap();
        pacing.play();
        assert!(!pacing.should_step(ms(10)));
    }

    #[test]
    fn test_toggle() {
        let mut pacing = controller(5.0);
        assert_eq!(pacing.toggle(), PacingState::Running);
        assert!(pacing.is_running());
        assert_eq!(pacing.toggle(), PacingState::Paused);
        pacing.play();
        pacing.pause();
        assert!(!pacing.is_running());
    }

    #[test]
    fn test_set_rate_rejects_non_positive() {
        let mut pacing = controller(5.0);
        assert_eq!(pacing.set_rate(0.0), Err(EngineError::InvalidRate { rate: 0.0 }));
        assert!(pacing.set_rate(-3.0).is_err());
        assert!(pacing.set_rate(f64::NAN).is_err());
        assert!(pacing.set_rate(f64::INFINITY).is_err());
        assert_eq!(pacing.rate(), 5.0);
        assert_eq!(pacing.interval(), ms(200));
    }

    #[test]
    fn test_set_rate_clamps() {
        let mut pacing = controller(5.0);
        assert_eq!(pacing.set_rate(1000.0).unwrap(), 60.0);
        assert_eq!(pacing.set_rate(0.01).unwrap(), 0.1);
        assert_eq!(pacing.interval(), Duration::from_secs(10));
        assert_eq!(pacing.set_rate(10.0).unwrap(), 10.0);
    }

    #[test]
    fn test_adjust_rate_saturates() {
        let mut pacing = controller(5.0);
        assert_eq!(pacing.adjust_rate(1.0), 6.0);
        assert_eq!(pacing.adjust_rate(-100.0), 0.1);
        assert_eq!(pacing.adjust_rate(f64::NAN), 0.1);
        assert_eq!(pacing.adjust_rate(500.0), 60.0);
    }

    #[test]
    fn test_rate_change_applies_on_next_check() {
        let mut pacing = controller(1.0);
        pacing.play();
        assert!(!pacing.should_step(ms(500)));
        pacing.set_rate(4.0).unwrap();
        assert!(pacing.should_step(ms(500)));
    }

    #[test]
    fn test_tiny_rate_bounds() {
        assert!(PacingController::new(1e-25, 1e-30, 60.0, Duration::ZERO).is_err());
        assert_eq!(interval_for_rate(1e-25), None);

        let mut pacing = PacingController {
            steps_per_second: 1e-25,
            min_rate: 1e-30,
            ..controller(5.0)
        };
        assert_eq!(pacing.interval(), Duration::MAX);
        pacing.play();
        assert!(!pacing.should_step(Duration::from_secs(1)));
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(PacingController::new(1.0, 0.0, 10.0, Duration::ZERO).is_err());
        assert!(PacingController::new(1.0, 5.0, 1.0, Duration::ZERO).is_err());
        assert!(PacingController::new(0.0, 0.1, 10.0, Duration::ZERO).is_err());
    }
}
