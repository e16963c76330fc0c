pub mod codelist_reader;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod ranges;
pub mod stats;

pub use codelist_reader::{ReaderOptions, read_codes_from_reader, read_codes_json};
pub use config::Config;
pub use constants::DEFAULT_GAP_TOLERANCE;
pub use error::{CodeListError, Result};
pub use export::{OutputFormat, export_to_path, render_ranges, write_ranges};
pub use ranges::{CodeRange, compress, expand};
pub use stats::{CodeSummary, RangeReport};
