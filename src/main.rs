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

//! x730d - button monitor daemon
//!
//! Long-lived process started at boot by the service supervisor. Raises the
//! boot-status pin once, then polls the shutdown-signal pin until a button
//! press classifies as a reboot or poweroff, fires that single privileged
//! action, and exits.

use std::path::PathBuf;

use tracing::{error, info};

use x730d::clock::MonotonicClock;
use x730d::config;
use x730d::gpio::{self, DigitalOutput};
use x730d::monitor::ButtonMonitor;
use x730d::power::SystemPower;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    eprintln!("x730d {} - X730 power-button monitor daemon", VERSION);
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    x730d [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -c, --config PATH   Config file (default /etc/x730/config.json)");
    eprintln!("    -v, --version       Print version");
    eprintln!("    -h, --help          Print this help");
    eprintln!();
    eprintln!("ENVIRONMENT:");
    eprintln!("    X730_LOG            Log level (trace, debug, info, warn, error)");
    eprintln!("    X730_CONFIG         Config file path (overridden by --config)");
}

fn print_version() {
    println!("x730d {}", VERSION);
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut config_override: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            "-v" | "--version" => {
                print_version();
                return Ok(());
            }
            "-c" | "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_override = Some(PathBuf::from(&args[i]));
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let log_level = std::env::var("X730_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .init();

    info!("x730d {} starting", VERSION);

    // Reboot/poweroff and /dev/gpiomem both need root.
    // SAFETY: geteuid is always safe - it just returns the process's effective uid.
    if unsafe { libc::geteuid() } != 0 {
        error!("x730d must run as root to invoke reboot/poweroff");
        std::process::exit(1);
    }

    let config_path = config_override.unwrap_or_else(config::config_path);
    let cfg = match config::load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("failed to load config {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
    };
    info!(
        "thresholds: reboot > {}ms, poweroff > {}ms, poll every {}ms",
        cfg.reboot_pulse_min_ms, cfg.reboot_pulse_max_ms, cfg.poll_interval_ms
    );

    // SIGINT/SIGTERM exits immediately; an in-flight pulse measurement is
    // abandoned and the supervisor decides whether to restart us.
    if let Err(e) = ctrlc::set_handler(move || {
        info!("received termination signal, exiting");
        std::process::exit(0);
    }) {
        error!("failed to set signal handler: {}", e);
    }

    let gpio = rppal::gpio::Gpio::new()?;
    let button = gpio::open_shutdown_signal(&gpio)?;
    let mut boot_status = gpio::open_boot_status(&gpio)?;

    // Tell the board's MCU the OS has finished booting. Never lowered by
    // this process; the level persists after exit.
    boot_status.write_high();
    info!("boot-status pin asserted");

    let mut monitor = ButtonMonitor::new(button, MonotonicClock, SystemPower, cfg);
    match monitor.run() {
        Ok(action) => {
            info!("{:?} action issued, exiting", action);
            Ok(())
        }
        Err(e) => {
            error!("power action failed: {}", e);
            std::process::exit(1);
        }
    }
}
