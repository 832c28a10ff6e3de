//! Configuration schema (datacheck.toml)
//!
//! Resolution order: built-in defaults, then the TOML file, then
//! environment variables. The binary applies its flags last.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::table::TableKind;

/// Environment variable naming the input directory
pub const ENV_DATA_PATH: &str = "DATA_PATH";

/// Environment variable naming the report directory
pub const ENV_REPORTS_DIR: &str = "DATACHECK_REPORTS_DIR";

/// Environment variable naming the flagged-row export file
pub const ENV_FLAGGED_OUTPUT: &str = "DATACHECK_FLAGGED_OUTPUT";

/// Cell contents read as null regardless of column type
pub const DEFAULT_NULL_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>",
];

fn default_data_path() -> PathBuf {
    PathBuf::from("data/")
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_flagged_output() -> PathBuf {
    PathBuf::from("flagged_transactions.csv")
}

fn default_delimiter() -> char {
    ';'
}

fn default_null_tokens() -> Vec<String> {
    DEFAULT_NULL_TOKENS.iter().map(|s| s.to_string()).collect()
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding customers.csv, products.csv and transactions.csv
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Directory the dated text report is written into
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// Flagged-row export file
    #[serde(default = "default_flagged_output")]
    pub flagged_output: PathBuf,

    /// Input field delimiter (single ASCII character)
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Cell contents treated as null
    #[serde(default = "default_null_tokens")]
    pub null_tokens: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            reports_dir: default_reports_dir(),
            flagged_output: default_flagged_output(),
            delimiter: default_delimiter(),
            null_tokens: default_null_tokens(),
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(ENV_DATA_PATH).filter(|v| !v.is_empty()) {
            self.data_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(ENV_REPORTS_DIR).filter(|v| !v.is_empty()) {
            self.reports_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup(ENV_FLAGGED_OUTPUT).filter(|v| !v.is_empty()) {
            self.flagged_output = PathBuf::from(file);
        }
        self
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_delimiter(self.delimiter)
    }

    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }

    /// Path of one input table
    pub fn input_path(&self, kind: TableKind) -> PathBuf {
        self.data_path.join(kind.file_name())
    }

    pub fn is_null_token(&self, raw: &str) -> bool {
        self.null_tokens.iter().any(|token| token == raw)
    }
}

/// Config error types
/// Delimiters the CSV reader can use: one ASCII byte that is not a quote or newline
pub fn validate_delimiter(delimiter: char) -> Result<(), ConfigError> {
    if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' {
        return Err(ConfigError::InvalidDelimiter(delimiter));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid delimiter {0:?}: must be a single ASCII character other than a quote or newline")]
    InvalidDelimiter(char),
}
