//! Output formatting utilities

use std::io::Write;

use colored::*;
use serde::Serialize;

use crate::error::CliResult;

/// Output format for the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width text table
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Write a serializable document in a structured format.
///
/// `Table` has no generic rendering and falls back to JSON. With `stream`
/// set, each document is self-delimiting so repeated writes stay parseable:
/// JSON is written compactly on a single line and YAML documents start
/// with `---`.
pub fn write_structured<T: Serialize, W: Write>(
    data: &T,
    format: OutputFormat,
    stream: bool,
    out: &mut W,
) -> CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Json if stream => {
            writeln!(out, "{}", serde_json::to_string(data)?)?;
        }
        OutputFormat::Table | OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(data)?)?;
        }
        OutputFormat::Yaml => {
            if stream {
                writeln!(out, "---")?;
            }
            write!(out, "{}", serde_yaml::to_string(data)?)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}
