use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Break,
}

pub type TickCallback = Box<dyn FnMut() -> TickFlow>;

/// Something that calls back at a fixed interval until told to stop.
pub trait TickSource {
    fn schedule(&mut self, interval: Duration, on_tick: TickCallback);
}

/// Tick source driven by hand, for tests and headless runs.
#[derive(Default)]
pub struct ManualTicker {
    interval: Option<Duration>,
    callback: Option<TickCallback>,
    fired: usize,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the callback once. Returns `Break` when nothing is scheduled.
    pub fn fire(&mut self) -> TickFlow {
        let Some(callback) = self.callback.as_mut() else {
            return TickFlow::Break;
        };
        self.fired += 1;
        let flow = callback();
        if flow == TickFlow::Break {
            self.callback = None;
        }
        flow
    }

    /// Fires until the callback breaks or `limit` ticks have run.
    pub fn run(&mut self, limit: usize) -> usize {
        let start = self.fired;
        while self.fired - start < limit && self.fire() == TickFlow::Continue {}
        self.fired - start
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn is_scheduled(&self) -> bool {
        self.callback.is_some()
    }
}

impl TickSource for ManualTicker {
    fn schedule(&mut self, interval: Duration, on_tick: TickCallback) {
        self.interval = Some(interval);
        self.callback = Some(on_tick);
    }
}

impl std::fmt::Debug for ManualTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualTicker")
            .field("interval", &self.interval)
            .field("scheduled", &self.callback.is_some())
            .field("fired", &self.fired)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::{Motion, RingConfig, RingSimulator};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_manual_ticker_drives_ring_to_the_end() {
        let config = RingConfig {
            size: 5,
            step: 1,
            max_ticks: 10,
        };
        let ring = Rc::new(RefCell::new(RingSimulator::new(config).unwrap()));
        let mut ticker = ManualTicker::new();

        let driven = ring.clone();
        ticker.schedule(
            DEFAULT_INTERVAL,
            Box::new(move || match driven.borrow_mut().tick() {
                Motion::Rotated { .. } => TickFlow::Continue,
                Motion::Stopped => TickFlow::Break,
            }),
        );
        assert_eq!(ticker.interval(), Some(Duration::from_secs(2)));

        // nine rotations, then the tick that notices the end
        assert_eq!(ticker.run(100), 10);
        assert!(!ticker.is_scheduled());
        assert!(ring.borrow().is_finished());
        assert_eq!(ticker.fire(), TickFlow::Break);
    }

    #[test]
    fn test_run_respects_limit() {
        let mut ticker = ManualTicker::new();
        let count = Rc::new(RefCell::new(0));
        let counter = count.clone();
        ticker.schedule(
            Duration::from_millis(5),
            Box::new(move || {
                *counter.borrow_mut() += 1;
                TickFlow::Continue
            }),
        );

        assert_eq!(ticker.run(3), 3);
        assert_eq!(*count.borrow(), 3);
        assert!(ticker.is_scheduled());
    }
}
