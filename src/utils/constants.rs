/// Record layout
pub const FIELD_DELIMITER: u8 = b';';
pub const LINE_TERMINATOR: u8 = b'\n';
pub const DECIMAL_POINT: u8 = b'.';
pub const MINUS_SIGN: u8 = b'-';

/// Configuration sources
pub const CONFIG_FILE: &str = "brc.toml";
pub const ENV_PREFIX: &str = "BRC";

/// Processing defaults
pub const DEFAULT_TABLE_CAPACITY: usize = 1024;

/// Logging
pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const VERBOSE_LOG_LEVEL: &str = "debug";
