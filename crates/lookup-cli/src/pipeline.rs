//! Configuration resolution and the line-oriented enrichment loop.
//!
//! The loop reads newline-delimited JSON, runs every line through a
//! [`LookupStage`] and writes the result as newline-delimited JSON. Lines
//! that do not parse are logged and counted, never fatal.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{debug, trace, warn};

use lookup_model::{Event, LookupConfig};
use lookup_transform::{FieldTransformer, LookupStage, Strategy};

use crate::logging::redact_value;
use crate::types::{CheckSummary, EnrichCounts, InputFormat};

/// Settings given on the command line. `Some` values replace file values.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub table_file: Option<PathBuf>,
    pub field: Option<String>,
    pub output_field: Option<String>,
    pub strict: Option<bool>,
    pub rename_key: Option<bool>,
    pub add_tag_prefix: Option<String>,
    pub remove_tag_prefix: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(self, mut config: LookupConfig) -> LookupConfig {
        if self.table_file.is_some() {
            config.table_file = self.table_file;
        }
        if self.field.is_some() {
            config.field = self.field;
        }
        if self.output_field.is_some() {
            config.output_field = self.output_field;
        }
        if let Some(strict) = self.strict {
            config.strict = strict;
        }
        if let Some(rename_key) = self.rename_key {
            config.rename_key = rename_key;
        }
        if self.add_tag_prefix.is_some() {
            config.add_tag_prefix = self.add_tag_prefix;
        }
        if self.remove_tag_prefix.is_some() {
            config.remove_tag_prefix = self.remove_tag_prefix;
        }
        config
    }
}

/// Read the optional configuration file and layer the overrides on top.
pub fn resolve_config(path: Option<&Path>, overrides: ConfigOverrides) -> Result<LookupConfig> {
    let base = match path {
        Some(path) => LookupConfig::from_toml_path(path)
            .with_context(|| format!("load configuration {}", path.display()))?,
        None => LookupConfig::default(),
    };
    Ok(overrides.apply(base))
}

/// Load the table for `config` and describe the resulting transformer.
pub fn check(config: &LookupConfig) -> Result<CheckSummary> {
    let transformer = FieldTransformer::from_config(config).context("configure lookup")?;
    let table_file = config.table_file.clone().unwrap_or_default();
    let output_field = match transformer.strategy() {
        Strategy::Copy { output } => Some(output.to_string()),
        Strategy::SelfAssign | Strategy::Rename => None,
    };
    Ok(CheckSummary {
        table_file,
        entries: transformer.dictionary().len(),
        strict: config.strict,
        mode: transformer.strategy().name().to_string(),
        field: transformer.field().to_string(),
        output_field,
    })
}

/// Reject tag rewriting when the output has nowhere to carry the tag.
///
/// Bare records are written back without their event, so a rewritten tag
/// would be dropped.
pub fn ensure_tags_written(config: &LookupConfig, format: InputFormat) -> Result<()> {
    if format == InputFormat::Records && !config.tag_options().is_empty() {
        bail!("tag rewriting needs `--input-format events`; records are written without a tag");
    }
    Ok(())
}

/// Enrich every line of `reader` and write the results to `writer`.
///
/// In [`InputFormat::Records`] mode each record is wrapped in an event
/// tagged `tag` and only the record is written back out.
pub fn enrich<R, W>(
    stage: &LookupStage,
    mut reader: R,
    mut writer: W,
    format: InputFormat,
    tag: &str,
) -> Result<EnrichCounts>
where
    R: BufRead,
    W: Write,
{
    let mut counts = EnrichCounts::default();
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        let line_number = counts.lines + 1;
        let read = reader
            .read_until(b'\n', &mut buffer)
            .with_context(|| format!("read input line {line_number}"))?;
        if read == 0 {
            break;
        }
        counts.lines += 1;
        let line = match std::str::from_utf8(&buffer) {
            Ok(line) => line.trim_end_matches(['\n', '\r']),
            Err(error) => {
                warn!(line = line_number, %error, "skipping input line that is not UTF-8");
                counts.skipped += 1;
                continue;
            }
        };
        if line.trim().is_empty() {
            counts.blank += 1;
            continue;
        }

        let output = match parse_line(line, format, tag) {
            Ok(event) => {
                let event = stage.process(event);
                trace!(
                    line = line_number,
                    tag = %event.tag,
                    input = redact_value(line),
                    "enriched record"
                );
                match format {
                    InputFormat::Records => Value::Object(event.record),
                    InputFormat::Events => serde_json::to_value(event)
                        .with_context(|| format!("encode event from line {line_number}"))?,
                }
            }
            Err(error) => {
                warn!(line = line_number, %error, "skipping invalid input line");
                counts.skipped += 1;
                continue;
            }
        };

        serde_json::to_writer(&mut writer, &output)
            .with_context(|| format!("write output for line {line_number}"))?;
        writer.write_all(b"\n").context("write output")?;
        counts.written += 1;
    }
    writer.flush().context("flush output")?;
    debug!(
        lines = counts.lines,
        written = counts.written,
        skipped = counts.skipped,
        "enrichment finished"
    );
    Ok(counts)
}

fn parse_line(line: &str, format: InputFormat, tag: &str) -> serde_json::Result<Event> {
    match format {
        InputFormat::Records => {
            let record = serde_json::from_str(line)?;
            Ok(Event::new(tag, Value::Null, record))
        }
        InputFormat::Events => serde_json::from_str(line),
    }
}
