use crate::constants::{COMPACT_SEPARATOR, CSV_END_HEADER, CSV_START_HEADER, LIST_SEPARATOR};
use crate::error::{CodeListError, Result};
use crate::ranges::CodeRange;

use csv::WriterBuilder;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use strum_macros::{Display, EnumIter, EnumString};

/// How a range list is rendered
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OutputFormat {
    /// `1...3,10...12`
    #[default]
    Ellipsis,
    /// `1..3,7,10..12`
    Compact,
    /// pretty-printed array of `{"start", "end"}` objects
    Json,
    /// `start,end` header plus one row per range
    Csv,
}

fn compact(range: &CodeRange) -> String {
    if range.is_singleton() {
        range.start().to_string()
    } else {
        format!("{}{}{}", range.start(), COMPACT_SEPARATOR, range.end())
    }
}

pub fn write_ranges<W: Write>(
    mut writer: W,
    ranges: &[CodeRange],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Ellipsis => {
            writeln!(writer, "{}", ranges.iter().join(LIST_SEPARATOR))?;
        }
        OutputFormat::Compact => {
            writeln!(writer, "{}", ranges.iter().map(compact).join(LIST_SEPARATOR))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, ranges)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let mut wtr = WriterBuilder::new().from_writer(&mut writer);
            wtr.write_record([CSV_START_HEADER, CSV_END_HEADER])?;
            for range in ranges {
                wtr.write_record([range.start().to_string(), range.end().to_string()])?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

pub fn render_ranges(ranges: &[CodeRange], format: OutputFormat) -> Result<String> {
    let mut buf = Vec::new();
    write_ranges(&mut buf, ranges, format)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes the rendered ranges to `path`, creating parent directories
pub fn export_to_path(ranges: &[CodeRange], format: OutputFormat, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| CodeListError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }

    let file = File::create(path).map_err(|e| CodeListError::CreateFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = BufWriter::new(file);
    write_ranges(&mut writer, ranges, format)?;
    writer.flush()?;
    Ok(())
}
