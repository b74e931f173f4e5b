use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup: both 'field' and 'table_file' are required, '{setting}' is not set")]
    MissingSetting { setting: &'static str },

    #[error("error at row {row} {fields:?}: too few columns: {count} instead of 2")]
    TooFewColumns {
        row: usize,
        count: usize,
        fields: Vec<String>,
    },

    #[error("error at row {row} {fields:?}: too many columns: {count} instead of 2")]
    TooManyColumns {
        row: usize,
        count: usize,
        fields: Vec<String>,
    },

    #[error("error at row {row} {fields:?}: duplicate entry for key '{key}'")]
    DuplicateEntry {
        row: usize,
        key: String,
        fields: Vec<String>,
    },

    #[error("lookup file is empty: {origin}")]
    EmptyTable { origin: String },

    #[error("unable to open file '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path} at line {line}: {message}")]
    Csv {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("failed to read configuration {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl LookupError {
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    /// Row number of a row-level build error, if this is one.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::TooFewColumns { row, .. }
            | Self::TooManyColumns { row, .. }
            | Self::DuplicateEntry { row, .. } => Some(*row),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
