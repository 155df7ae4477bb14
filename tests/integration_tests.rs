/*
 * Integration tests for x730d
 *
 * These drive the button-monitoring state machine and the shutdown
 * notifier end to end against scripted fake hardware, covering the
 * classification windows and the notifier argument contract.
 */

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use x730d::clock::Clock;
use x730d::config::MonitorConfig;
use x730d::error::{Result, X730Error};
use x730d::gpio::{DigitalInput, DigitalOutput};
use x730d::monitor::{ButtonMonitor, PressAction};
use x730d::notifier::{parse_hold_seconds, signal_clean_shutdown, DEFAULT_HOLD};
use x730d::power::PowerControl;

// Scripted fakes sharing a virtual timeline that advances only on sleep.

#[derive(Clone)]
struct VirtClock {
    base: Instant,
    offset: Rc<Cell<Duration>>,
}

impl VirtClock {
    fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Clock for VirtClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }

    fn sleep(&mut self, duration: Duration) {
        self.offset.set(self.offset.get() + duration);
    }
}

struct ScriptButton {
    offset: Rc<Cell<Duration>>,
    high_until_ms: u64,
}

impl DigitalInput for ScriptButton {
    fn read_high(&mut self) -> bool {
        self.offset.get() < Duration::from_millis(self.high_until_ms)
    }
}

#[derive(Clone, Default)]
struct CountingPower {
    reboots: Rc<Cell<u32>>,
    poweroffs: Rc<Cell<u32>>,
}

impl PowerControl for CountingPower {
    fn reboot(&mut self) -> Result<()> {
        self.reboots.set(self.reboots.get() + 1);
        Ok(())
    }

    fn poweroff(&mut self) -> Result<()> {
        self.poweroffs.set(self.poweroffs.get() + 1);
        Ok(())
    }
}

struct AckPin {
    offset: Rc<Cell<Duration>>,
    transitions: RefCell<Vec<(Duration, bool)>>,
}

impl DigitalOutput for AckPin {
    fn write_high(&mut self) {
        self.transitions.borrow_mut().push((self.offset.get(), true));
    }

    fn write_low(&mut self) {
        self.transitions.borrow_mut().push((self.offset.get(), false));
    }
}

fn run_press(held_ms: u64, poll_ms: u64) -> (Option<PressAction>, CountingPower, Duration) {
    let clock = VirtClock::new();
    let button = ScriptButton {
        offset: clock.offset.clone(),
        high_until_ms: held_ms,
    };
    let power = CountingPower::default();
    let cfg = MonitorConfig {
        poll_interval_ms: poll_ms,
        ..MonitorConfig::default()
    };
    let mut monitor = ButtonMonitor::new(button, clock.clone(), power.clone(), cfg);
    let action = monitor.run().ok();
    (action, power, clock.elapsed())
}

#[test]
fn test_press_300ms_reboots() {
    let (action, power, _) = run_press(300, 100);
    assert_eq!(action, Some(PressAction::Reboot));
    assert_eq!(power.reboots.get(), 1);
    assert_eq!(power.poweroffs.get(), 0);
}

#[test]
fn test_hold_past_600ms_powers_off_while_held() {
    // Held "forever": the action must fire without waiting for release.
    let (action, power, elapsed) = run_press(u64::MAX / 2, 100);
    assert_eq!(action, Some(PressAction::Poweroff));
    assert_eq!(power.poweroffs.get(), 1);
    assert_eq!(power.reboots.get(), 0);
    // First sample strictly past the 600ms threshold.
    assert_eq!(elapsed, Duration::from_millis(700));
}

#[test]
fn test_noise_150ms_then_long_press() {
    // A 150ms blip is discarded; the monitor keeps polling and the next
    // press still classifies normally.
    let clock = VirtClock::new();
    struct TwoPulses {
        offset: Rc<Cell<Duration>>,
    }
    impl DigitalInput for TwoPulses {
        fn read_high(&mut self) -> bool {
            let t = self.offset.get().as_millis() as u64;
            t < 150 || (1_000..1_400).contains(&t)
        }
    }
    let button = TwoPulses {
        offset: clock.offset.clone(),
    };
    let power = CountingPower::default();
    let mut monitor = ButtonMonitor::new(
        button,
        clock,
        power.clone(),
        MonitorConfig {
            poll_interval_ms: 50,
            ..MonitorConfig::default()
        },
    );

    assert_eq!(monitor.run().unwrap(), PressAction::Reboot);
    assert_eq!(power.reboots.get(), 1);
    assert_eq!(power.poweroffs.get(), 0);
}

#[test]
fn test_action_fires_exactly_once() {
    let (_, power, _) = run_press(u64::MAX / 2, 100);
    assert_eq!(power.reboots.get() + power.poweroffs.get(), 1);
}

#[test]
fn test_notifier_hold_and_clear() {
    let mut clock = VirtClock::new();
    let mut pin = AckPin {
        offset: clock.offset.clone(),
        transitions: RefCell::new(Vec::new()),
    };

    let hold = parse_hold_seconds("4").unwrap();
    signal_clean_shutdown(&mut pin, &mut clock, hold);

    assert_eq!(
        *pin.transitions.borrow(),
        vec![(Duration::ZERO, true), (Duration::from_secs(4), false)]
    );
}

#[test]
fn test_notifier_argument_contract() {
    assert_eq!(parse_hold_seconds("4").unwrap(), Duration::from_secs(4));
    assert_eq!(
        parse_hold_seconds("1.5").unwrap(),
        Duration::from_millis(1_500)
    );
    assert!(parse_hold_seconds("abc").is_err());
    assert_eq!(DEFAULT_HOLD, Duration::from_secs(4));
}

#[test]
fn test_error_display() {
    let err = X730Error::config("bad thresholds");
    assert_eq!(format!("{}", err), "Configuration error: bad thresholds");

    let err = X730Error::invalid_duration("abc", "not a decimal number of seconds");
    assert!(format!("{}", err).contains("\"abc\""));
    assert!(format!("{}", err).contains("not a decimal number"));
}

#[test]
fn test_config_defaults_match_board_timings() {
    let cfg = MonitorConfig::default();
    assert_eq!(cfg.reboot_pulse_min(), Duration::from_millis(200));
    assert_eq!(cfg.reboot_pulse_max(), Duration::from_millis(600));
    assert!(cfg.reboot_pulse_min() < cfg.reboot_pulse_max());
}
