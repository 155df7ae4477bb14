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

//! x730d - power-button daemon for the Geekworm X730 Raspberry Pi UPS board
//!
//! This library provides the button-monitoring state machine, the shutdown
//! acknowledgment sequence, and the hardware seams (GPIO, clock, power)
//! both binaries are built on.

pub mod clock;
pub mod config;
pub mod error;
pub mod gpio;
pub mod monitor;
pub mod notifier;
pub mod power;

#[cfg(test)]
pub mod test_utils;
