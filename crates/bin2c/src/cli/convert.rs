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

//! Argument parsing and file handling around the converter
//!
//! The converter itself never touches the filesystem. This module reads the
//! input blob, streams both artifacts to disk through buffered writers, and
//! maps every outcome to a process exit status.

use crate::config::ConversionConfig;
use crate::converter::Converter;
use crate::error::{Bin2cError, Result};
use crate::logging;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info};

/// CLI arguments for the bin2c tool
#[derive(Parser, Debug, Clone)]
#[command(name = "bin2c")]
#[command(about = "Convert a binary file into a C array definition and declaration")]
#[command(version)]
pub struct Bin2cArgs {
    /// Binary file to convert
    #[arg(short = 'i', long = "ifile", value_name = "FILE")]
    pub input: PathBuf,

    /// Name of the generated C array
    #[arg(short = 'a', long = "arrayname", value_name = "NAME")]
    pub array_name: String,

    /// Output C file. Its last two characters are replaced by `.h` for the header
    #[arg(short = 'o', long = "ofile", value_name = "FILE")]
    pub output: PathBuf,

    /// Enables verbose logging
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Accepted for compatibility with older build scripts and ignored
    #[arg(long = "len", value_name = "LEN", hide = true)]
    pub len: Option<String>,
}

impl TryFrom<Bin2cArgs> for ConversionConfig {
    type Error = Bin2cError;

    fn try_from(args: Bin2cArgs) -> Result<Self> {
        ConversionConfig::new(args.input, args.array_name, args.output)
    }
}

/// What a successful conversion produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub byte_count: usize,
    pub definition_path: PathBuf,
    pub declaration_path: PathBuf,
}

/// Reads one input file and writes its definition and declaration files
pub struct ConversionPipeline {
    config: ConversionConfig,
}

impl ConversionPipeline {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Run the conversion
    ///
    /// The definition file is written before the declaration file is opened, so
    /// a failing declaration leaves a complete definition behind.
    pub fn execute(&self) -> Result<ConversionSummary> {
        let bytes = self.read_input()?;
        let converter = Converter::new(&bytes, &self.config.array_name);

        write_artifact(&self.config.definition_path, |writer| {
            converter.write_definition(writer)
        })?;
        write_artifact(&self.config.declaration_path, |writer| {
            converter.write_declaration(writer)
        })?;

        Ok(ConversionSummary {
            byte_count: converter.len(),
            definition_path: self.config.definition_path.clone(),
            declaration_path: self.config.declaration_path.clone(),
        })
    }

    fn read_input(&self) -> Result<Vec<u8>> {
        let path = &self.config.input;
        let bytes = fs::read(path).map_err(|source| Bin2cError::OpenInput {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), len = bytes.len(), "read input");
        Ok(bytes)
    }
}

fn write_artifact<F>(path: &Path, render: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file = File::create(path).map_err(|source| Bin2cError::OpenOutput {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    render(&mut writer)
        .and_then(|()| writer.flush())
        .map_err(|source| Bin2cError::WriteOutput {
            path: path.to_path_buf(),
            source,
        })?;

    info!(path = %path.display(), "wrote");
    Ok(())
}

/// Main entry point for the bin2c CLI
///
/// Help and version requests exit with 0. Every failure, including malformed
/// arguments, prints a diagnostic and exits with 2.
pub fn run_bin2c_cli<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Bin2cArgs::try_parse_from(args) {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => return report(Bin2cError::Usage(err)),
    };

    logging::init(args.verbose);

    match convert_files(args) {
        Ok(summary) => {
            debug!(?summary, "conversion finished");
            println!("File converted");
            ExitCode::SUCCESS
        }
        Err(err) => report(err),
    }
}

fn convert_files(args: Bin2cArgs) -> Result<ConversionSummary> {
    let config = ConversionConfig::try_from(args)?;

    println!(
        "Converting: {} to C array {} in files {} and {}",
        config.input.display(),
        config.array_name,
        config.definition_path.display(),
        config.declaration_path.display()
    );

    ConversionPipeline::new(config).execute()
}

fn report(err: Bin2cError) -> ExitCode {
    match &err {
        Bin2cError::Usage(usage) => {
            let _ = usage.print();
        }
        other => {
            error!("{other}");
            debug!(error = ?other, "conversion failed");
        }
    }

    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pipeline_in(dir: &TempDir, input: &[u8]) -> ConversionPipeline {
        let input_path = dir.path().join("blob.bin");
        fs::write(&input_path, input).unwrap();

        let config =
            ConversionConfig::new(input_path, "blob", dir.path().join("blob.c")).unwrap();
        ConversionPipeline::new(config)
    }

    #[test]
    fn test_parse_short_flags() {
        let args =
            Bin2cArgs::try_parse_from(["bin2c", "-i", "fw.bin", "-a", "fw", "-o", "fw.c"]).unwrap();

        assert_eq!(args.input, PathBuf::from("fw.bin"));
        assert_eq!(args.array_name, "fw");
        assert_eq!(args.output, PathBuf::from("fw.c"));
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_parse_long_flags() {
        let args = Bin2cArgs::try_parse_from([
            "bin2c",
            "--ifile",
            "fw.bin",
            "--arrayname=fw",
            "--ofile",
            "gen/fw.c",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.output, PathBuf::from("gen/fw.c"));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_missing_flag_is_usage_error() {
        let err = Bin2cArgs::try_parse_from(["bin2c", "-i", "fw.bin", "-o", "fw.c"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(Bin2cError::from(err).exit_code(), 2);
    }

    #[test]
    fn test_len_is_accepted_and_ignored() {
        let args = Bin2cArgs::try_parse_from([
            "bin2c", "-i", "fw.bin", "-a", "fw", "-o", "fw.c", "--len=4096",
        ])
        .unwrap();
        assert_eq!(args.len.as_deref(), Some("4096"));

        let config = ConversionConfig::try_from(args).unwrap();
        assert_eq!(config.definition_path, PathBuf::from("fw.c"));
    }

    #[test]
    fn test_help_is_not_a_failure() {
        let err = Bin2cArgs::try_parse_from(["bin2c", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_args_into_config() {
        let args =
            Bin2cArgs::try_parse_from(["bin2c", "-i", "fw.bin", "-a", "fw", "-o", "out/fw.c"]).unwrap();
        let config = ConversionConfig::try_from(args).unwrap();

        assert_eq!(config.declaration_path, PathBuf::from("out/fw.h"));
    }

    #[test]
    fn test_pipeline_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let pipeline = pipeline_in(&dir, &[0x00, 0x01, 0xff]);

        let summary = pipeline.execute().unwrap();
        assert_eq!(summary.byte_count, 3);

        let definition = fs::read_to_string(dir.path().join("blob.c")).unwrap();
        let declaration = fs::read_to_string(dir.path().join("blob.h")).unwrap();
        assert_eq!(definition, "const unsigned char blob[3] = {\n\t0x00, 0x01, 0xff, };");
        assert!(declaration.starts_with("#ifndef _BLOB_BIN2C_HEADER\n"));
        assert!(declaration.contains("extern const unsigned char blob[3];"));
    }

    #[test]
    fn test_pipeline_empty_input() {
        let dir = TempDir::new().unwrap();
        let summary = pipeline_in(&dir, &[]).execute().unwrap();

        assert_eq!(summary.byte_count, 0);
        let definition = fs::read_to_string(&summary.definition_path).unwrap();
        assert_eq!(definition, "const unsigned char blob[0] = {};");
    }

    #[test]
    fn test_pipeline_missing_input_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let config = ConversionConfig::new(
            dir.path().join("missing.bin"),
            "blob",
            dir.path().join("blob.c"),
        )
        .unwrap();

        let err = ConversionPipeline::new(config).execute().unwrap_err();
        assert!(matches!(err, Bin2cError::OpenInput { .. }));
        assert!(err.to_string().contains("missing.bin"));
        assert!(!dir.path().join("blob.c").exists());
        assert!(!dir.path().join("blob.h").exists());
    }

    #[test]
    fn test_pipeline_unwritable_output() {
        let dir = TempDir::new().unwrap();
        let input_path = dir.path().join("blob.bin");
        fs::write(&input_path, [1, 2, 3]).unwrap();

        let definition_path = dir.path().join("no_such_dir").join("blob.c");
        let config = ConversionConfig::new(input_path, "blob", definition_path).unwrap();

        let err = ConversionPipeline::new(config).execute().unwrap_err();
        assert!(matches!(err, Bin2cError::OpenOutput { .. }));
        assert!(err.to_string().contains("no_such_dir"));
    }

    #[test]
    fn test_pipeline_declaration_failure_keeps_definition() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("blob.h")).unwrap();
        let pipeline = pipeline_in(&dir, &[0xaa]);

        let err = pipeline.execute().unwrap_err();
        assert!(matches!(err, Bin2cError::OpenOutput { .. }));
        assert!(err.to_string().contains("blob.h"));
        assert_eq!(err.exit_code(), 2);

        let definition = fs::read_to_string(dir.path().join("blob.c")).unwrap();
        assert_eq!(definition, "const unsigned char blob[1] = {\n\t0xaa, };");
    }

    #[test]
    fn test_run_exit_codes() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.bin");

        assert_eq!(run_bin2c_cli(["bin2c", "--help"]), ExitCode::SUCCESS);
        assert_eq!(run_bin2c_cli(["bin2c", "-i"]), ExitCode::from(2));
        assert_eq!(
            run_bin2c_cli([
                OsString::from("bin2c"),
                OsString::from("-i"),
                missing.into_os_string(),
                OsString::from("-a"),
                OsString::from("blob"),
                OsString::from("-o"),
                dir.path().join("blob.c").into_os_string(),
            ]),
            ExitCode::from(2)
        );
    }
}
