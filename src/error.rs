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

//! Unified error handling for x730d
//!
//! A single error type shared by both binaries, defined with thiserror so
//! every variant carries a proper Display and Error impl.

use std::io;
use std::process::ExitStatus;

/// Result type alias using X730Error
pub type Result<T> = std::result::Result<T, X730Error>;

/// Unified error type for all x730d operations
#[derive(thiserror::Error, Debug)]
pub enum X730Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("GPIO error: {0}")]
    Gpio(#[from] rppal::gpio::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Invalid hold duration {input:?}: {reason}")]
    InvalidDuration { input: String, reason: String },

    #[error("Power command {command} exited with {status}")]
    PowerCommand { command: String, status: ExitStatus },
}

impl X730Error {
    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid duration error
    pub fn invalid_duration(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
