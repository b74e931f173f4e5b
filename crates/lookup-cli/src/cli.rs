//! CLI argument definitions for the `lookup` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use lookup_cli::pipeline::ConfigOverrides;
use lookup_cli::types::InputFormat;

#[derive(Parser)]
#[command(
    name = "lookup",
    version,
    about = "Enrich JSON records from a two-column CSV lookup table",
    long_about = "Enrich newline-delimited JSON records from a two-column CSV lookup table.\n\n\
                  A field's value is replaced, copied to another field, or used to rename\n\
                  the field's key, according to the configured mode."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow record contents in trace logs (redacted otherwise).
    #[arg(long = "log-records", global = true)]
    pub log_records: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Enrich newline-delimited JSON from a file or stdin.
    Enrich(EnrichArgs),

    /// Load the lookup table and report the resolved configuration.
    Check(CheckArgs),
}

/// Lookup settings shared by every subcommand.
#[derive(Args)]
pub struct LookupArgs {
    /// TOML configuration file; flags below override its values.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Two-column CSV file holding the lookup table.
    #[arg(long = "table-file", value_name = "PATH")]
    pub table_file: Option<PathBuf>,

    /// Dotted path of the field to look up.
    #[arg(long = "field", value_name = "PATH")]
    pub field: Option<String>,

    /// Dotted path receiving the looked-up value.
    #[arg(long = "output-field", value_name = "PATH")]
    pub output_field: Option<String>,

    /// Reject extra columns, duplicate keys and empty tables.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Rename the field's key instead of changing its value.
    #[arg(long = "rename-key")]
    pub rename_key: bool,

    /// Prefix added to every event tag (events input only).
    #[arg(long = "add-tag-prefix", value_name = "PREFIX")]
    pub add_tag_prefix: Option<String>,

    /// Prefix removed from event tags that carry it (events input only).
    #[arg(long = "remove-tag-prefix", value_name = "PREFIX")]
    pub remove_tag_prefix: Option<String>,
}

impl LookupArgs {
    /// Flags given on the command line. Unset switches leave file values alone.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            table_file: self.table_file.clone(),
            field: self.field.clone(),
            output_field: self.output_field.clone(),
            strict: self.strict.then_some(true),
            rename_key: self.rename_key.then_some(true),
            add_tag_prefix: self.add_tag_prefix.clone(),
            remove_tag_prefix: self.remove_tag_prefix.clone(),
        }
    }
}

#[derive(Args)]
pub struct EnrichArgs {
    /// Input file of newline-delimited JSON (stdin when absent or `-`).
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub lookup: LookupArgs,

    /// Shape of each input line.
    #[arg(long = "input-format", value_enum, default_value = "records")]
    pub input_format: InputFormatArg,

    /// Tag given to bare records while they pass through the stage.
    ///
    /// Record output carries no tag, so it only shows up in trace logs.
    #[arg(long = "tag", default_value = "lookup")]
    pub tag: String,

    /// Output file (stdout when absent).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub lookup: LookupArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InputFormatArg {
    Records,
    Events,
}

impl From<InputFormatArg> for InputFormat {
    fn from(value: InputFormatArg) -> Self {
        match value {
            InputFormatArg::Records => Self::Records,
            InputFormatArg::Events => Self::Events,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
