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

//! Byte-to-C-array conversion
//!
//! Renders a binary blob as a sized `const unsigned char` array definition and a
//! matching include-guarded `extern` declaration. Both artifacts are produced from
//! the same [`Converter`], so the array name and length always agree.

use std::fmt;
use std::io::{self, Write};

/// Number of array elements emitted per line of the definition
pub const BYTES_PER_LINE: usize = 16;

const GUARD_PREFIX: &str = "_";
const GUARD_SUFFIX: &str = "_BIN2C_HEADER";

/// Include guard token for the declaration of `array_name`
pub fn guard_token(array_name: &str) -> String {
    format!("{GUARD_PREFIX}{}{GUARD_SUFFIX}", array_name.to_uppercase())
}

/// Convert `bytes` into definition and declaration text for `array_name`
pub fn convert(bytes: &[u8], array_name: &str) -> Artifacts {
    Converter::new(bytes, array_name).render()
}

/// Fully rendered output of a conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// `const unsigned char NAME[N] = { ... };`
    pub definition: String,
    /// Include-guarded `extern const unsigned char NAME[N];`
    pub declaration: String,
}

/// Single-shot converter over a borrowed blob
///
/// The array name is used verbatim. It is not checked for being a valid C
/// identifier; a malformed name simply produces malformed C.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    bytes: &'a [u8],
    array_name: &'a str,
}

impl<'a> Converter<'a> {
    pub fn new(bytes: &'a [u8], array_name: &'a str) -> Self {
        Self { bytes, array_name }
    }

    /// Array length recorded in both artifacts
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn definition(&self) -> Definition<'a> {
        Definition(*self)
    }

    pub fn declaration(&self) -> Declaration<'a> {
        Declaration(*self)
    }

    /// Stream the definition artifact into `writer`
    pub fn write_definition<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{}", self.definition())
    }

    /// Stream the declaration artifact into `writer`
    pub fn write_declaration<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{}", self.declaration())
    }

    /// Render both artifacts into owned strings
    pub fn render(&self) -> Artifacts {
        Artifacts {
            definition: self.definition().to_string(),
            declaration: self.declaration().to_string(),
        }
    }
}

/// The array definition, rendered lazily through [`fmt::Display`]
#[derive(Debug, Clone, Copy)]
pub struct Definition<'a>(Converter<'a>);

impl fmt::Display for Definition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Converter { bytes, array_name } = self.0;

        write!(f, "const unsigned char {array_name}[{}] = {{", bytes.len())?;
        for (index, byte) in bytes.iter().enumerate() {
            if index % BYTES_PER_LINE == 0 {
                f.write_str("\n\t")?;
            }
            write!(f, "0x{byte:02x}, ")?;
        }
        f.write_str("};")
    }
}

/// The include-guarded `extern` declaration, rendered lazily through [`fmt::Display`]
#[derive(Debug, Clone, Copy)]
pub struct Declaration<'a>(Converter<'a>);

impl fmt::Display for Declaration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Converter { bytes, array_name } = self.0;
        let guard = guard_token(array_name);

        writeln!(f, "#ifndef {guard}")?;
        writeln!(f, "#define {guard}")?;
        writeln!(f)?;
        writeln!(f, "extern const unsigned char {array_name}[{}];", bytes.len())?;
        writeln!(f)?;
        f.write_str("#endif")
    }
}
