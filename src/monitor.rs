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

//! Button-monitoring state machine.
//!
//! The board pulses the shutdown-signal pin high while the physical button
//! is held. The monitor samples that pin on a fixed interval and classifies
//! each pulse by duration: at or below the reboot minimum it is noise,
//! strictly above it (released in time) it is a reboot request, and a pulse
//! held strictly past the maximum is a poweroff request. The poweroff fires
//! while the button is still down; it does not wait for release.
//!
//! Both thresholds use strict "greater than" comparisons, so a pulse lasting
//! exactly `reboot_pulse_min` is still noise and one lasting exactly
//! `reboot_pulse_max` still resolves as a reboot.

use std::time::Instant;

use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::MonitorConfig;
use crate::error::Result;
use crate::gpio::DigitalInput;
use crate::power::PowerControl;

/// The single privileged action a monitor process fires before exiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressAction {
    Reboot,
    Poweroff,
}

/// Observable state of the polling loop. A fired action is not a state:
/// firing ends the process, so `run` simply returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Signal pin reads low; no pulse in progress.
    Idle,
    /// Signal pin went high at `pressed_at`; duration is being measured.
    Measuring { pressed_at: Instant },
}

pub struct ButtonMonitor<B, C, P> {
    button: B,
    clock: C,
    power: P,
    config: MonitorConfig,
    state: MonitorState,
}

impl<B, C, P> ButtonMonitor<B, C, P>
where
    B: DigitalInput,
    C: Clock,
    P: PowerControl,
{
    pub fn new(button: B, clock: C, power: P, config: MonitorConfig) -> Self {
        Self {
            button,
            clock,
            power,
            config,
            state: MonitorState::Idle,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Take one sample of the signal pin and advance the state machine.
    ///
    /// Returns the action to fire, if this sample decided one. Does not
    /// sleep and does not touch the power capability; `run` owns both.
    pub fn step(&mut self) -> Option<PressAction> {
        let level_high = self.button.read_high();
        let now = self.clock.now();

        match self.state {
            MonitorState::Idle => {
                if level_high {
                    info!("button pulse detected on shutdown-signal pin");
                    self.state = MonitorState::Measuring { pressed_at: now };
                }
                None
            }
            MonitorState::Measuring { pressed_at } => {
                let held = now.duration_since(pressed_at);
                // Long press fires while the button is still down.
                if held > self.config.reboot_pulse_max() {
                    return Some(PressAction::Poweroff);
                }
                if level_high {
                    return None;
                }
                if held > self.config.reboot_pulse_min() {
                    Some(PressAction::Reboot)
                } else {
                    debug!("pulse of {:?} below reboot minimum, ignoring as noise", held);
                    self.state = MonitorState::Idle;
                    None
                }
            }
        }
    }

    /// Poll until a press classifies, fire the privileged action, and
    /// return it. The action fires at most once per process lifetime: the
    /// first classification ends the loop.
    ///
    /// A failed reboot/poweroff invocation propagates to the caller; there
    /// is no retry. The service supervisor owns restart policy.
    pub fn run(&mut self) -> Result<PressAction> {
        loop {
            if let Some(action) = self.step() {
                match action {
                    PressAction::Reboot => {
                        info!("short press: requesting system reboot");
                        self.power.reboot()?;
                    }
                    PressAction::Poweroff => {
                        info!("long press: requesting system poweroff");
                        self.power.poweroff()?;
                    }
                }
                return Ok(action);
            }
            self.clock.sleep(self.config.poll_interval());
        }
    }
}
