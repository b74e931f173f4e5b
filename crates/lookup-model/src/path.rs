//! Dotted field paths into nested records.

use std::fmt;

/// Ordered key segments addressing a location inside a nested record.
///
/// Built by splitting a configuration string on `.`, so `nested.key1`
/// becomes `["nested", "key1"]`. Segments are kept verbatim: no trimming,
/// and empty segments (`a..b`) address the empty key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('.').map(String::from).collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Self {
                segments: vec![String::new()],
            };
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Final segment: the key read or written inside the containing map.
    pub fn leaf(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Every segment but the last: the maps walked to reach the leaf.
    pub fn parents(&self) -> &[String] {
        &self.segments[..self.segments.len().saturating_sub(1)]
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
