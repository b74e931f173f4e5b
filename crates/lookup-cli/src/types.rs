use std::path::PathBuf;
use std::time::Duration;

/// Where enriched lines come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// One JSON object per line; the line is the record.
    #[default]
    Records,
    /// One `{"tag", "time", "record"}` object per line.
    Events,
}

/// Line counts for one enrichment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichCounts {
    pub lines: usize,
    pub written: usize,
    pub blank: usize,
    pub skipped: usize,
}

#[derive(Debug)]
pub struct EnrichSummary {
    pub input: String,
    pub output: String,
    pub counts: EnrichCounts,
    pub elapsed: Duration,
}

/// What `check` learned about a configuration.
#[derive(Debug)]
pub struct CheckSummary {
    pub table_file: PathBuf,
    pub entries: usize,
    pub strict: bool,
    pub mode: String,
    pub field: String,
    pub output_field: Option<String>,
}
