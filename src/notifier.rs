/*
 * This file is part of x730d.
 *
 * Copyright (C) 2026 x730d contributors
 *
 * x730d is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * x730d is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with x730d. If not, see <https://www.gnu.org/licenses/>.
 */

//! Shutdown notifier: assert the acknowledgment pin for a bounded window
//! during OS shutdown so the board firmware can tell a clean shutdown from
//! a crash.
//!
//! The board MCU times how long the pin stays high: roughly 1-2 seconds
//! means a reboot is in progress, 3-7 seconds a normal poweroff, and 8 or
//! more seconds reads as an unresponsive host, at which point the firmware
//! cuts power on its own.

use std::time::Duration;

use tracing::info;

use crate::clock::Clock;
use crate::error::{Result, X730Error};
use crate::gpio::DigitalOutput;

/// Default hold: squarely inside the firmware's clean-poweroff window.
pub const DEFAULT_HOLD: Duration = Duration::from_secs(4);

/// Hold signalling a reboot in progress (1-2s window).
pub const REBOOT_ACK_HOLD: Duration = Duration::from_secs(2);

/// Holds at or past this read as a crashed host; the firmware pulls power.
pub const CRASH_HOLD_THRESHOLD: Duration = Duration::from_secs(8);

/// Parse the hold duration argument: a non-negative decimal number of
/// seconds, fractional values allowed.
pub fn parse_hold_seconds(arg: &str) -> Result<Duration> {
    let secs: f64 = arg
        .trim()
        .parse()
        .map_err(|_| X730Error::invalid_duration(arg, "not a decimal number of seconds"))?;
    if !secs.is_finite() {
        return Err(X730Error::invalid_duration(arg, "must be finite"));
    }
    if secs < 0.0 {
        return Err(X730Error::invalid_duration(arg, "must not be negative"));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|_| X730Error::invalid_duration(arg, "out of range"))
}

/// Drive the acknowledgment pin high for `hold`, then clear it.
///
/// Invoked as a blocking shutdown hook; the service-manager integration
/// guarantees this completes before the OS finishes going down.
pub fn signal_clean_shutdown<O, C>(pin: &mut O, clock: &mut C, hold: Duration)
where
    O: DigitalOutput,
    C: Clock,
{
    info!("asserting shutdown acknowledgment for {:.1}s", hold.as_secs_f64());
    pin.write_high();
    clock.sleep(hold);
    pin.write_low();
    info!("shutdown acknowledgment cleared");
}
