// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Error types for bin2c

use std::io;
use std::path::PathBuf;

/// Exit status reported for every failed conversion
pub const FAILURE_EXIT_CODE: u8 = 2;

pub type Result<T> = std::result::Result<T, Bin2cError>;

/// Everything that can stop a conversion
///
/// All variants are terminal. Nothing is retried and any output already written
/// is left in place.
#[derive(Debug, thiserror::Error)]
pub enum Bin2cError {
    #[error("{0}")]
    Usage(#[from] clap::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Couldn't open input file: {}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Couldn't open output file: {}", .path.display())]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Couldn't write output file: {}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Bin2cError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_)
            | Self::InvalidConfig(_)
            | Self::OpenInput { .. }
            | Self::OpenOutput { .. }
            | Self::WriteOutput { .. } => FAILURE_EXIT_CODE,
        }
    }
}
