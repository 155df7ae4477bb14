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

//! GPIO line setup for the X730 expansion board (BCM numbering).
//!
//! Three lines are in play: the board pulses the shutdown-signal pin high
//! while the physical button is held, the daemon raises the boot-status pin
//! once the OS is up, and the shutdown notifier raises the acknowledgment
//! pin while the OS is going down cleanly.

use rppal::gpio::{Gpio, InputPin, OutputPin};

use crate::error::Result;

/// Input pulsed high by the board while the power button is pressed.
pub const SHUTDOWN_SIGNAL_PIN: u8 = 4;

/// Output raised once at daemon startup to tell the board the OS booted.
pub const BOOT_STATUS_PIN: u8 = 17;

/// Output raised by the notifier while a clean shutdown is in progress.
pub const SHUTDOWN_ACK_PIN: u8 = 18;

/// A readable digital line.
pub trait DigitalInput {
    fn read_high(&mut self) -> bool;
}

/// A writable digital line.
pub trait DigitalOutput {
    fn write_high(&mut self);
    fn write_low(&mut self);
}

impl DigitalInput for InputPin {
    fn read_high(&mut self) -> bool {
        InputPin::is_high(self)
    }
}

impl DigitalOutput for OutputPin {
    fn write_high(&mut self) {
        OutputPin::set_high(self)
    }

    fn write_low(&mut self) {
        OutputPin::set_low(self)
    }
}

/// Configure the shutdown-signal pin as input with pull-down (idle = low).
pub fn open_shutdown_signal(gpio: &Gpio) -> Result<InputPin> {
    Ok(gpio.get(SHUTDOWN_SIGNAL_PIN)?.into_input_pulldown())
}

/// Configure the boot-status pin as output, initially low.
///
/// The level must survive process exit: the board's MCU keeps watching this
/// line after the daemon has fired its one action, so the pin is not reset
/// on drop.
pub fn open_boot_status(gpio: &Gpio) -> Result<OutputPin> {
    let mut pin = gpio.get(BOOT_STATUS_PIN)?.into_output_low();
    pin.set_reset_on_drop(false);
    Ok(pin)
}

/// Configure the shutdown-acknowledgment pin as output, initially low.
pub fn open_shutdown_ack(gpio: &Gpio) -> Result<OutputPin> {
    let mut pin = gpio.get(SHUTDOWN_ACK_PIN)?.into_output_low();
    pin.set_reset_on_drop(false);
    Ok(pin)
}
