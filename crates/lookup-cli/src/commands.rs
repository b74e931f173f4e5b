use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use lookup_cli::pipeline::{check, enrich, ensure_tags_written, resolve_config};
use lookup_cli::types::{CheckSummary, EnrichSummary};
use lookup_transform::LookupStage;

use crate::cli::{CheckArgs, EnrichArgs};

pub fn run_check(args: &CheckArgs) -> Result<CheckSummary> {
    let config = resolve_config(args.lookup.config.as_deref(), args.lookup.overrides())?;
    check(&config)
}

pub fn run_enrich(args: &EnrichArgs) -> Result<EnrichSummary> {
    let config = resolve_config(args.lookup.config.as_deref(), args.lookup.overrides())?;
    let format = args.input_format.into();
    ensure_tags_written(&config, format)?;
    let stage = LookupStage::from_config(&config).context("configure lookup")?;

    let input_name = match args.input.as_deref() {
        Some(path) if path != Path::new("-") => path.display().to_string(),
        _ => "<stdin>".to_string(),
    };
    let output_name = args
        .output
        .as_deref()
        .map_or_else(|| "<stdout>".to_string(), |path| path.display().to_string());

    let span = info_span!("enrich", input = %input_name, output = %output_name);
    let _guard = span.enter();
    let start = Instant::now();

    let reader = open_input(args.input.as_deref())?;
    let writer = open_output(args.output.as_deref())?;
    let counts = enrich(&stage, reader, writer, format, &args.tag)?;
    let elapsed = start.elapsed();

    info!(
        lines = counts.lines,
        written = counts.written,
        skipped = counts.skipped,
        elapsed_ms = elapsed.as_millis(),
        "enrichment complete"
    );
    Ok(EnrichSummary {
        input: input_name,
        output: output_name,
        counts,
        elapsed,
    })
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file =
                File::open(path).with_context(|| format!("open input {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create output {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
