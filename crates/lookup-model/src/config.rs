//! Stage configuration.
//!
//! Settings come from a TOML file, for example:
//!
//! ```toml
//! table_file = "/etc/lookup/actors.csv"
//! field = "nested.key1"
//! output_field = "new.foo"
//! strict = true
//! add_tag_prefix = "lookup."
//! ```
//!
//! and may be overridden field by field by the command line.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LookupError, Result};
use crate::path::FieldPath;

/// Validation policy applied while building the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Reject short rows only; extra columns are ignored, later duplicates win,
    /// and an empty table is allowed.
    #[default]
    Lenient,
    /// Reject short rows, extra columns, duplicate keys and an empty table.
    Strict,
}

impl Strictness {
    pub fn from_flag(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }

    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Tag rewriting applied to each event before it is forwarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOptions {
    pub remove_tag_prefix: Option<String>,
    pub remove_tag_suffix: Option<String>,
    pub add_tag_prefix: Option<String>,
    pub add_tag_suffix: Option<String>,
}

impl TagOptions {
    pub fn is_empty(&self) -> bool {
        self.remove_tag_prefix.is_none()
            && self.remove_tag_suffix.is_none()
            && self.add_tag_prefix.is_none()
            && self.add_tag_suffix.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupConfig {
    /// Two-column CSV file holding the lookup table.
    pub table_file: Option<PathBuf>,
    /// Dotted path of the field whose value (or key name) is looked up.
    pub field: Option<String>,
    /// Dotted path receiving the looked-up value. Ignored when `rename_key` is set.
    pub output_field: Option<String>,
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub rename_key: bool,
    pub remove_tag_prefix: Option<String>,
    pub remove_tag_suffix: Option<String>,
    pub add_tag_prefix: Option<String>,
    pub add_tag_suffix: Option<String>,
}

impl LookupConfig {
    pub fn new(table_file: impl Into<PathBuf>, field: impl Into<String>) -> Self {
        Self {
            table_file: Some(table_file.into()),
            field: Some(field.into()),
            ..Self::default()
        }
    }

    pub fn from_toml_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| LookupError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| LookupError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn with_output_field(mut self, output_field: impl Into<String>) -> Self {
        self.output_field = Some(output_field.into());
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_rename_key(mut self, rename_key: bool) -> Self {
        self.rename_key = rename_key;
        self
    }

    #[must_use]
    pub fn with_add_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.add_tag_prefix = Some(prefix.into());
        self
    }

    /// Check required settings and return the table file and field path.
    pub fn validate(&self) -> Result<(&Path, FieldPath)> {
        let field = self
            .field
            .as_deref()
            .ok_or(LookupError::MissingSetting { setting: "field" })?;
        let table_file = self
            .table_file
            .as_deref()
            .ok_or(LookupError::MissingSetting {
                setting: "table_file",
            })?;
        Ok((table_file, FieldPath::parse(field)))
    }

    pub fn strictness(&self) -> Strictness {
        Strictness::from_flag(self.strict)
    }

    pub fn output_path(&self) -> Option<FieldPath> {
        self.output_field.as_deref().map(FieldPath::parse)
    }

    pub fn tag_options(&self) -> TagOptions {
        TagOptions {
            remove_tag_prefix: self.remove_tag_prefix.clone(),
            remove_tag_suffix: self.remove_tag_suffix.clone(),
            add_tag_prefix: self.add_tag_prefix.clone(),
            add_tag_suffix: self.add_tag_suffix.clone(),
        }
    }
}
