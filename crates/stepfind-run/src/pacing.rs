//! Step pacing and step observers.
//!
//! Pacing is the only place a run blocks. It exists for animation and has no
//! effect on which steps are produced.

use std::time::Duration;

use stepfind_paths::StepEvent;

/// Waits between two steps of a run.
pub trait Pacer {
    /// Called after every step that did not reach the target.
    fn pause(&mut self);
}

/// Sleeps the current thread for a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepPacer {
    pub interval: Duration,
}

impl SleepPacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Pacer for SleepPacer {
    fn pause(&mut self) {
        if !self.interval.is_zero() {
            std::thread::sleep(self.interval);
        }
    }
}

/// Never waits. For headless runs and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPacing;

impl Pacer for NoPacing {
    #[inline]
    fn pause(&mut self) {}
}

/// Receives every step of a run, after the session's observation state has
/// been updated for it.
pub trait Observer {
    fn on_step(&mut self, step: &StepEvent);
}

impl<F: FnMut(&StepEvent)> Observer for F {
    #[inline]
    fn on_step(&mut self, step: &StepEvent) {
        (self)(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use stepfind_core::Node;

    #[test]
    fn sleep_pacer_waits() {
        let mut p = SleepPacer::new(Duration::from_millis(5));
        let start = Instant::now();
        p.pause();
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn closures_are_observers() {
        let mut seen = Vec::new();
        let mut obs = |s: &StepEvent| seen.push(s.node);
        let step = StepEvent {
            node: Node::new(1, 2),
            path: vec![Node::new(1, 2)],
            found: false,
        };
        obs.on_step(&step);
        obs.on_step(&step);
        assert_eq!(seen, vec![Node::new(1, 2), Node::new(1, 2)]);
    }
}
