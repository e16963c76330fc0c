use crate::constants::{CODE_KEY, CODELIST_KEY, CODELISTS_KEY, DEFAULT_VALUE_FIELD, STRUCTURE_KEY};
use crate::error::{CodeListError, Result};

use log::debug;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Which code list to read and where each entry keeps its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    pub codelist_index: usize,
    pub value_field: String,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            codelist_index: 0,
            value_field: DEFAULT_VALUE_FIELD.to_string(),
        }
    }
}

/// Reads the unique integer codes of an SDMX-JSON code list file
///
/// # Errors
/// Returns error if the file cannot be opened, is not JSON, or an entry
/// does not hold an integer code
pub fn read_codes_json<P: AsRef<Path>>(path: P, opt: &ReaderOptions) -> Result<BTreeSet<i64>> {
    let path = path.as_ref();
    debug!("Reading code list from {}", path.display());
    let file = File::open(path)?;
    read_codes_from_reader(BufReader::new(file), opt)
}

/// Read codes from `structure.codelists.codelist[i].code[*]`.
/// - Values may be JSON strings (`"1234"`) or integers
/// - Duplicate codes collapse into one
/// - An empty `code` array gives an empty set
pub fn read_codes_from_reader<R: Read>(reader: R, opt: &ReaderOptions) -> Result<BTreeSet<i64>> {
    let document: Value = serde_json::from_reader(reader)?;
    let entries = code_entries(&document, opt.codelist_index)?;

    let mut codes = BTreeSet::new();
    let mut duplicates = 0usize;
    for (index, entry) in entries.iter().enumerate() {
        let code = parse_code(entry, index, &opt.value_field)?;
        if !codes.insert(code) {
            duplicates += 1;
        }
    }

    debug!(
        "Read {} code entries, {} unique, {} duplicates",
        entries.len(),
        codes.len(),
        duplicates
    );
    Ok(codes)
}

/// Walks down to the `code` array, naming the first missing step on failure
fn code_entries(document: &Value, codelist_index: usize) -> Result<&Vec<Value>> {
    let mut path = String::new();
    let mut node = document;

    for key in [STRUCTURE_KEY, CODELISTS_KEY, CODELIST_KEY] {
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(key);
        node = node.get(key).ok_or_else(|| missing_field(&path))?;
    }

    path.push_str(&format!("[{codelist_index}]"));
    node = node.get(codelist_index).ok_or_else(|| missing_field(&path))?;

    path.push('.');
    path.push_str(CODE_KEY);
    node.get(CODE_KEY)
        .and_then(Value::as_array)
        .ok_or_else(|| missing_field(&path))
}

fn parse_code(entry: &Value, index: usize, value_field: &str) -> Result<i64> {
    let value = entry
        .get(value_field)
        .ok_or_else(|| missing_field(&format!("{CODE_KEY}[{index}].{value_field}")))?;

    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| CodeListError::CodeParse {
            index,
            value: n.to_string(),
        }),
        Value::String(s) => s.trim().parse().map_err(|_| CodeListError::CodeParse {
            index,
            value: s.clone(),
        }),
        other => Err(CodeListError::CodeParse {
            index,
            value: other.to_string(),
        }),
    }
}

fn missing_field(path: &str) -> CodeListError {
    CodeListError::MissingField {
        path: path.to_string(),
    }
}
