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

//! x730-shutdown - shutdown acknowledgment hook
//!
//! Invoked synchronously by the service manager while the OS is going down.
//! Holds the acknowledgment pin high for the requested number of seconds
//! (default 4), then clears it. The argument is validated before any
//! hardware is touched; invalid input exits with status 1.

use std::time::Duration;

use tracing::error;

use x730d::clock::MonotonicClock;
use x730d::error::Result;
use x730d::gpio;
use x730d::notifier::{self, DEFAULT_HOLD};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    eprintln!("x730-shutdown {} - X730 shutdown acknowledgment hook", VERSION);
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    x730-shutdown [SECONDS]");
    eprintln!();
    eprintln!("ARGS:");
    eprintln!("    SECONDS   How long to hold the acknowledgment pin high");
    eprintln!("              (decimal, fractional allowed; default 4).");
    eprintln!("              1-2s signals reboot, 3-7s clean poweroff; the");
    eprintln!("              board firmware treats 8s+ as a crashed host.");
}

fn run(hold: Duration) -> Result<()> {
    let gpio = rppal::gpio::Gpio::new()?;
    let mut ack = gpio::open_shutdown_ack(&gpio)?;
    notifier::signal_clean_shutdown(&mut ack, &mut MonotonicClock, hold);
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Validate the argument first; invalid input must never touch hardware.
    let hold = match args.get(1).map(String::as_str) {
        Some("-h") | Some("--help") => {
            print_help();
            return;
        }
        Some("-V") | Some("--version") => {
            println!("x730-shutdown {}", VERSION);
            return;
        }
        Some(arg) => match notifier::parse_hold_seconds(arg) {
            Ok(hold) => hold,
            Err(e) => {
                eprintln!("x730-shutdown: {}", e);
                std::process::exit(1);
            }
        },
        None => DEFAULT_HOLD,
    };

    let log_level = std::env::var("X730_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .init();

    if let Err(e) = run(hold) {
        error!("shutdown acknowledgment failed: {}", e);
        std::process::exit(1);
    }
}
