/*
 * Test utilities and fake hardware for x730d
 *
 * Deterministic stand-ins for the clock, the button input, and output
 * pins, so the state machine and the notifier can be driven through exact
 * timing scenarios without real GPIO.
 */

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::clock::Clock;
use crate::gpio::{DigitalInput, DigitalOutput};

/// Shared virtual timeline: a fixed base instant plus an offset that only
/// advances when the code under test sleeps.
#[derive(Clone)]
pub struct Timeline {
    base: Instant,
    offset: Rc<Cell<Duration>>,
}

impl Timeline {
    fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn offset(&self) -> Duration {
        self.offset.get()
    }
}

/// Clock whose time only moves when slept.
#[derive(Clone)]
pub struct VirtualClock {
    timeline: Timeline,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self {
            timeline: Timeline::new(),
        }
    }

    pub fn timeline(&self) -> Timeline {
        self.timeline.clone()
    }

    /// Total virtual time slept so far.
    pub fn elapsed(&self) -> Duration {
        self.timeline.offset()
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Instant {
        self.timeline.base + self.timeline.offset()
    }

    fn sleep(&mut self, duration: Duration) {
        self.timeline.offset.set(self.timeline.offset() + duration);
    }
}

/// Button input scripted as half-open high windows `[start_ms, end_ms)` on
/// the shared timeline.
pub struct ScriptedButton {
    timeline: Timeline,
    high_windows: Vec<(Duration, Duration)>,
}

impl ScriptedButton {
    pub fn new(timeline: Timeline, windows_ms: Vec<(u64, u64)>) -> Self {
        Self {
            timeline,
            high_windows: windows_ms
                .into_iter()
                .map(|(s, e)| (Duration::from_millis(s), Duration::from_millis(e)))
                .collect(),
        }
    }
}

impl DigitalInput for ScriptedButton {
    fn read_high(&mut self) -> bool {
        let t = self.timeline.offset();
        self.high_windows.iter().any(|(start, end)| t >= *start && t < *end)
    }
}

/// Output pin recording every level change with its virtual timestamp.
pub struct RecordingOutput {
    timeline: Timeline,
    transitions: Rc<RefCell<Vec<(Duration, bool)>>>,
}

impl RecordingOutput {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            transitions: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn transitions(&self) -> Vec<(Duration, bool)> {
        self.transitions.borrow().clone()
    }
}

impl DigitalOutput for RecordingOutput {
    fn write_high(&mut self) {
        self.transitions
            .borrow_mut()
            .push((self.timeline.offset(), true));
    }

    fn write_low(&mut self) {
        self.transitions
            .borrow_mut()
            .push((self.timeline.offset(), false));
    }
}
