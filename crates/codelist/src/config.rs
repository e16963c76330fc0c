use crate::{
    codelist_reader::ReaderOptions,
    constants::{DEFAULT_GAP_TOLERANCE, DEFAULT_INPUT_PATH, DEFAULT_VALUE_FIELD},
    error::{CodeListError, Result},
    export::OutputFormat,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub compress: CompressConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct InputConfig {
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub codelist_index: usize,
    #[serde(default = "default_value_field")]
    pub value_field: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CompressConfig {
    #[serde(default = "default_gap_tolerance")]
    pub gap_tolerance: i64, // signed so a negative value is reported, not a parse error
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    pub path: Option<PathBuf>, // stdout when absent
}

fn default_input_path() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_PATH)
}

fn default_value_field() -> String {
    DEFAULT_VALUE_FIELD.to_string()
}

fn default_gap_tolerance() -> i64 {
    DEFAULT_GAP_TOLERANCE
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
            codelist_index: 0,
            value_field: default_value_field(),
        }
    }
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            gap_tolerance: DEFAULT_GAP_TOLERANCE,
        }
    }
}

impl Config {
    /// Reads, parses and validates a TOML config file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CodeListError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            CodeListError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Checks values serde cannot reject on its own
    pub fn validate(&self) -> Result<()> {
        if self.compress.gap_tolerance < 0 {
            return Err(CodeListError::InvalidTolerance(self.compress.gap_tolerance));
        }

        if self.input.path.as_os_str().is_empty() {
            return Err(CodeListError::Config("input.path cannot be empty".to_string()));
        }

        if self.input.value_field.trim().is_empty() {
            return Err(CodeListError::Config(
                "input.value_field cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn reader_options(&self) -> ReaderOptions {
        ReaderOptions {
            codelist_index: self.input.codelist_index,
            value_field: self.input.value_field.clone(),
        }
    }
}
