//! Per-record dictionary lookups.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use lookup_model::{Dictionary, FieldPath, LookupConfig, Record, Result};

use crate::path::{self, MissingParents};

/// How a lookup result is written back into the record.
///
/// Chosen once when the transformer is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Replace the field's value with its dictionary entry.
    SelfAssign,
    /// Write the dictionary entry (or the original value on a miss) to `output`.
    Copy { output: FieldPath },
    /// Rename the field's key to the dictionary entry for the key name.
    Rename,
}

impl Strategy {
    /// Rename wins over an output path; an output path selects copy.
    pub fn select(output: Option<FieldPath>, rename_key: bool) -> Self {
        match (rename_key, output) {
            (true, _) => Self::Rename,
            (false, Some(output)) => Self::Copy { output },
            (false, None) => Self::SelfAssign,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SelfAssign => "self-assign",
            Self::Copy { .. } => "copy",
            Self::Rename => "rename",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy { output } => write!(f, "copy to {output}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Enriches records by looking up `field` in a shared dictionary.
///
/// `transform` never fails: a missing field, a missing dictionary entry or
/// a path running through a non-map value all leave the record as it was.
#[derive(Debug, Clone)]
pub struct FieldTransformer {
    dictionary: Arc<Dictionary>,
    field: FieldPath,
    strategy: Strategy,
}

impl FieldTransformer {
    pub fn new(
        dictionary: Arc<Dictionary>,
        field: FieldPath,
        output: Option<FieldPath>,
        rename_key: bool,
    ) -> Self {
        Self {
            dictionary,
            field,
            strategy: Strategy::select(output, rename_key),
        }
    }

    /// Validate the settings, load the lookup file and pick the strategy.
    pub fn from_config(config: &LookupConfig) -> Result<Self> {
        let (table_file, field) = config.validate()?;
        let dictionary = lookup_table::load(table_file, config.strictness())?;
        let transformer = Self::new(
            Arc::new(dictionary),
            field,
            config.output_path(),
            config.rename_key,
        );
        info!(
            field = %transformer.field,
            strategy = %transformer.strategy,
            entries = transformer.dictionary.len(),
            "configured lookup"
        );
        Ok(transformer)
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Apply the lookup to `record` in place and hand it back.
    pub fn transform<'a>(&self, record: &'a mut Record) -> &'a mut Record {
        match &self.strategy {
            Strategy::SelfAssign => self.assign_in_place(record),
            Strategy::Copy { output } => self.copy_to(record, output),
            Strategy::Rename => self.rename_key(record),
        }
        record
    }

    fn lookup(&self, value: &Value) -> Option<&str> {
        value.as_str().and_then(|key| self.dictionary.get(key))
    }

    fn assign_in_place(&self, record: &mut Record) {
        let Some(container) = path::dig_mut(record, &self.field, MissingParents::Skip) else {
            return;
        };
        let Some(slot) = container.get_mut(self.field.leaf()) else {
            return;
        };
        if let Some(hit) = self.lookup(slot) {
            *slot = Value::String(hit.to_string());
        }
    }

    fn copy_to(&self, record: &mut Record, output: &FieldPath) {
        let Some(value) = path::get(record, &self.field) else {
            return;
        };
        let enriched = match self.lookup(value) {
            Some(hit) => Value::String(hit.to_string()),
            None => value.clone(),
        };
        if let Some(target) = path::dig_mut(record, output, MissingParents::Create) {
            target.insert(output.leaf().to_string(), enriched);
        }
    }

    fn rename_key(&self, record: &mut Record) {
        let Some(container) = path::dig_mut(record, &self.field, MissingParents::Skip) else {
            return;
        };
        let leaf = self.field.leaf();
        let Some(renamed) = self.dictionary.get(leaf) else {
            return;
        };
        if let Some(value) = container.remove(leaf) {
            container.insert(renamed.to_string(), value);
        }
    }
}
