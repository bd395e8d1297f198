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

//! Validated conversion settings

use crate::error::{Bin2cError, Result};
use std::path::{Path, PathBuf};

/// Appended to the definition path once its two-character extension is removed
pub const DECLARATION_SUFFIX: &str = ".h";

/// Everything a conversion needs, checked once up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
    /// Binary file to embed
    pub input: PathBuf,
    /// Identifier of the generated array, used verbatim
    pub array_name: String,
    /// Where the array definition is written
    pub definition_path: PathBuf,
    /// Where the declaration is written, derived from `definition_path`
    pub declaration_path: PathBuf,
}

impl ConversionConfig {
    pub fn new(
        input: impl Into<PathBuf>,
        array_name: impl Into<String>,
        definition_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let array_name = array_name.into();
        if array_name.is_empty() {
            return Err(Bin2cError::InvalidConfig("array name must not be empty".to_string()));
        }

        let definition_path = definition_path.into();
        let declaration_path = declaration_path_for(&definition_path)?;
        if declaration_path == definition_path {
            return Err(Bin2cError::InvalidConfig(format!(
                "declaration file {} would overwrite the definition file",
                declaration_path.display()
            )));
        }

        Ok(Self {
            input: input.into(),
            array_name,
            definition_path,
            declaration_path,
        })
    }
}

/// Derive the declaration path from the definition path
///
/// The last two characters of the path are assumed to be a two-character
/// extension such as `.c` and are replaced by [`DECLARATION_SUFFIX`]. Nothing
/// else about the path is inspected, so `fw.cc` becomes `fw..h`.
pub fn declaration_path_for(definition_path: &Path) -> Result<PathBuf> {
    let text = definition_path.to_str().ok_or_else(|| {
        Bin2cError::InvalidConfig(format!(
            "output path {} is not valid UTF-8",
            definition_path.display()
        ))
    })?;

    let cut = text
        .char_indices()
        .rev()
        .nth(1)
        .map(|(index, _)| index)
        .ok_or_else(|| {
            Bin2cError::InvalidConfig(format!(
                "output path {text:?} is too short to carry a two-character extension"
            ))
        })?;

    Ok(PathBuf::from(format!("{}{DECLARATION_SUFFIX}", &text[..cut])))
}
