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

//! bin2c Library
//!
//! Converts binary blobs such as firmware images or bitmaps into a C array
//! definition (`.c`) and a matching include-guarded declaration (`.h`) so they
//! can be compiled straight into a program.

pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod logging;

// Re-export main entry points for easy access
pub use cli::convert::{Bin2cArgs, ConversionPipeline, ConversionSummary, run_bin2c_cli};
pub use config::ConversionConfig;
pub use converter::{Artifacts, Converter, convert, guard_token};
pub use error::{Bin2cError, Result};
