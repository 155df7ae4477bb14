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

use std::process::Command;

use tracing::info;

use crate::error::{Result, X730Error};

const REBOOT_CMD: &str = "/sbin/reboot";
const POWEROFF_CMD: &str = "/sbin/poweroff";

/// Privileged power-state capability the button monitor depends on.
///
/// Both operations are fire-and-forget: on success the OS begins going down
/// and the calling process will be terminated by the system shortly after.
/// A returned error means the command itself could not be issued or exited
/// non-zero, which the monitor treats as fatal.
#[cfg_attr(test, mockall::automock)]
pub trait PowerControl {
    fn reboot(&mut self) -> Result<()>;
    fn poweroff(&mut self) -> Result<()>;
}

/// Real power control, shelling out to the system reboot/poweroff binaries.
#[derive(Debug, Default)]
pub struct SystemPower;

impl PowerControl for SystemPower {
    fn reboot(&mut self) -> Result<()> {
        run_power_command(REBOOT_CMD)
    }

    fn poweroff(&mut self) -> Result<()> {
        run_power_command(POWEROFF_CMD)
    }
}

fn run_power_command(command: &str) -> Result<()> {
    info!("invoking {}", command);
    let status = Command::new(command).status()?;
    if !status.success() {
        return Err(X730Error::PowerCommand {
            command: command.to_string(),
            status,
        });
    }
    Ok(())
}
