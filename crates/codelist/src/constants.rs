/// Compression settings
pub const DEFAULT_GAP_TOLERANCE: i64 = 49; // codes within 50 of the previous one stay contiguous

/// SDMX-JSON code list layout
pub const STRUCTURE_KEY: &str = "structure";
pub const CODELISTS_KEY: &str = "codelists";
pub const CODELIST_KEY: &str = "codelist";
pub const CODE_KEY: &str = "code";
pub const DEFAULT_VALUE_FIELD: &str = "value";

/// Rendering
pub const RANGE_SEPARATOR: &str = "..."; // start...end
pub const COMPACT_SEPARATOR: &str = ".."; // start..end, bare code for singletons
pub const LIST_SEPARATOR: &str = ",";

/// Expected headers in exported CSV files
pub const CSV_START_HEADER: &str = "start";
pub const CSV_END_HEADER: &str = "end";

/// Default config location
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const DEFAULT_INPUT_PATH: &str = "data/codelists.json";
