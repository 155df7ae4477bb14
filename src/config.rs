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

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, X730Error};

fn default_poll_interval_ms() -> u64 {
    200
}

fn default_reboot_pulse_min_ms() -> u64 {
    200
}

fn default_reboot_pulse_max_ms() -> u64 {
    600
}

/// Timing configuration for the button monitor.
///
/// A pulse on the shutdown-signal pin is classified by its duration:
/// anything at or below `reboot_pulse_min_ms` is noise, anything strictly
/// above it (released before the maximum) requests a reboot, and a pulse
/// held strictly past `reboot_pulse_max_ms` requests a poweroff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_reboot_pulse_min_ms")]
    pub reboot_pulse_min_ms: u64,
    #[serde(default = "default_reboot_pulse_max_ms")]
    pub reboot_pulse_max_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            reboot_pulse_min_ms: default_reboot_pulse_min_ms(),
            reboot_pulse_max_ms: default_reboot_pulse_max_ms(),
        }
    }
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn reboot_pulse_min(&self) -> Duration {
        Duration::from_millis(self.reboot_pulse_min_ms)
    }

    pub fn reboot_pulse_max(&self) -> Duration {
        Duration::from_millis(self.reboot_pulse_max_ms)
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = env::var("X730_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("/etc/x730/config.json")
}

pub fn validate_config(cfg: &MonitorConfig) -> std::result::Result<(), String> {
    if cfg.poll_interval_ms == 0 {
        return Err("poll_interval_ms must be greater than zero".to_string());
    }
    if cfg.reboot_pulse_min_ms >= cfg.reboot_pulse_max_ms {
        return Err(format!(
            "reboot_pulse_min_ms ({}) must be less than reboot_pulse_max_ms ({})",
            cfg.reboot_pulse_min_ms, cfg.reboot_pulse_max_ms
        ));
    }
    Ok(())
}

/// Load the monitor configuration from `path`.
///
/// A missing file is not an error; the documented defaults apply. A file
/// that exists but does not parse or validate is fatal, since silently
/// reverting thresholds would change what a button press does.
pub fn load_config(path: &Path) -> Result<MonitorConfig> {
    if !path.exists() {
        return Ok(MonitorConfig::default());
    }
    let data = fs::read_to_string(path)?;
    let cfg: MonitorConfig = serde_json::from_str(&data)
        .map_err(|e| X730Error::config(format!("{}: {}", path.display(), e)))?;
    validate_config(&cfg).map_err(X730Error::Config)?;
    Ok(cfg)
}
