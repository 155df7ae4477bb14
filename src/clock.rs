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

use std::thread;
use std::time::{Duration, Instant};

/// Time source for the polling loops.
///
/// Pulse durations are compared at millisecond resolution, so `now()` must
/// be monotonic; wall-clock adjustments must not skew an in-flight
/// measurement. `sleep()` is the only suspension mechanism the daemon uses.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Production clock backed by `Instant` and blocking `thread::sleep`.
#[derive(Debug, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
