//! Dictionary construction from tabular rows.

use std::collections::HashMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use lookup_model::{Dictionary, LookupError, Result, Strictness};

/// Accumulates validated rows into a [`Dictionary`].
///
/// Any row error aborts the build: callers get either a complete
/// dictionary or an error, never a partial table.
#[derive(Debug)]
pub struct DictionaryBuilder {
    strictness: Strictness,
    entries: HashMap<String, String>,
    origin: String,
}

impl DictionaryBuilder {
    pub fn new(strictness: Strictness) -> Self {
        Self {
            strictness,
            entries: HashMap::new(),
            origin: "<rows>".to_string(),
        }
    }

    pub fn strict() -> Self {
        Self::new(Strictness::Strict)
    }

    pub fn lenient() -> Self {
        Self::new(Strictness::Lenient)
    }

    /// Name the source in error messages (usually the file path).
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate one row and insert `fields[0] -> fields[1]`.
    ///
    /// `row` is the 1-based row number used in error messages. A rejected
    /// row leaves the entries collected so far untouched.
    pub fn handle_row<S: AsRef<str>>(&mut self, row: usize, fields: &[S]) -> Result<()> {
        if fields.len() < 2 {
            return Err(LookupError::TooFewColumns {
                row,
                count: fields.len(),
                fields: owned(fields),
            });
        }

        let strict = self.strictness.is_strict();
        if strict && fields.len() > 2 {
            return Err(LookupError::TooManyColumns {
                row,
                count: fields.len(),
                fields: owned(fields),
            });
        }

        let key = fields[0].as_ref();
        let value = fields[1].as_ref();
        if self.entries.contains_key(key) {
            if strict {
                return Err(LookupError::DuplicateEntry {
                    row,
                    key: key.to_string(),
                    fields: owned(fields),
                });
            }
            debug!(row, key, "overwriting duplicate lookup entry");
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Finish the build, rejecting an empty table under strict mode.
    pub fn finish(self) -> Result<Dictionary> {
        if self.strictness.is_strict() && self.entries.is_empty() {
            return Err(LookupError::EmptyTable {
                origin: self.origin,
            });
        }
        Ok(Dictionary::new(self.entries))
    }
}

fn owned<S: AsRef<str>>(fields: &[S]) -> Vec<String> {
    fields.iter().map(|f| f.as_ref().to_string()).collect()
}

/// Build a dictionary from in-memory rows.
pub fn build<I, R, S>(strictness: Strictness, rows: I) -> Result<Dictionary>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut builder = DictionaryBuilder::new(strictness);
    for (idx, row) in rows.into_iter().enumerate() {
        builder.handle_row(idx + 1, row.as_ref())?;
    }
    builder.finish()
}

/// Load a dictionary from a headerless, comma-separated lookup file.
///
/// Open and read failures of any kind (missing file, permission denied)
/// surface as [`LookupError::Unreadable`] with the path attached. A blank
/// line is a row with no fields and fails the load in either mode.
pub fn load(path: &Path, strictness: Strictness) -> Result<Dictionary> {
    let data = std::fs::read(path).map_err(|source| LookupError::unreadable(path, source))?;
    let mut blank_lines = blank_line_offsets(&data).into_iter().peekable();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_slice());

    let mut builder =
        DictionaryBuilder::new(strictness).with_origin(path.display().to_string());
    let mut record = StringRecord::new();
    let mut records = 0usize;
    let mut rows = 0usize;
    loop {
        while blank_lines.next_if_eq(&records).is_some() {
            rows += 1;
            builder.handle_row::<&str>(rows, &[])?;
        }
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => return Err(csv_error(path, e)),
        }
        records += 1;
        rows += 1;
        let fields: Vec<&str> = record.iter().collect();
        builder.handle_row(rows, &fields)?;
    }

    let dictionary = builder.finish()?;
    info!(
        path = %path.display(),
        rows,
        entries = dictionary.len(),
        strict = strictness.is_strict(),
        "loaded lookup table"
    );
    Ok(dictionary)
}

/// For each blank line outside a quoted field, the number of records
/// that precede it.
///
/// The csv reader drops blank lines without reporting them, so they are
/// located up front to keep them in the row sequence.
fn blank_line_offsets(data: &[u8]) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut records = 0usize;
    let mut in_quotes = false;
    let mut line_start = true;
    let mut bytes = data.iter().copied().peekable();
    while let Some(byte) = bytes.next() {
        if line_start && !in_quotes {
            let blank = match byte {
                b'\n' => true,
                b'\r' => bytes.next_if_eq(&b'\n').is_some(),
                _ => false,
            };
            if blank {
                offsets.push(records);
                continue;
            }
            records += 1;
            line_start = false;
        }
        match byte {
            b'"' => in_quotes = !in_quotes,
            b'\n' if !in_quotes => line_start = true,
            _ => {}
        }
    }
    offsets
}

fn csv_error(path: &Path, error: csv::Error) -> LookupError {
    let line = error.position().map_or(0, csv::Position::line);
    let message = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(source) => LookupError::unreadable(path, source),
        _ => LookupError::Csv {
            path: path.to_path_buf(),
            line,
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_row() {
        let mut builder = DictionaryBuilder::lenient();
        builder.handle_row(1, &["foo", "bar"]).unwrap();
        let dictionary = builder.finish().unwrap();
        assert_eq!(dictionary.get("foo"), Some("bar"));
        assert_eq!(dictionary.len(), 1);
    }

    #[test]
    fn too_small_row() {
        let mut builder = DictionaryBuilder::lenient();
        let err = builder.handle_row(1, &["foo"]).unwrap_err();
        assert!(matches!(err, LookupError::TooFewColumns { count: 1, .. }));
        assert!(builder.is_empty());
    }

    #[test]
    fn too_large_row_lenient_keeps_first_two_fields() {
        let mut builder = DictionaryBuilder::lenient();
        builder.handle_row(1, &["foo", "bar", "baz"]).unwrap();
        assert_eq!(builder.finish().unwrap().get("foo"), Some("bar"));
    }

    #[test]
    fn too_large_row_strict() {
        let mut builder = DictionaryBuilder::strict();
        let err = builder.handle_row(1, &["foo", "bar", "baz"]).unwrap_err();
        assert!(matches!(err, LookupError::TooManyColumns { count: 3, .. }));
        assert!(builder.is_empty());
    }

    #[test]
    fn duplicate_row_lenient_last_wins() {
        let mut builder = DictionaryBuilder::lenient();
        builder.handle_row(1, &["foo", "bar"]).unwrap();
        builder.handle_row(2, &["foo", "baz"]).unwrap();
        let dictionary = builder.finish().unwrap();
        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.get("foo"), Some("baz"));
    }

    #[test]
    fn duplicate_row_strict() {
        let mut builder = DictionaryBuilder::strict();
        builder.handle_row(1, &["foo", "bar"]).unwrap();
        let err = builder.handle_row(2, &["foo", "baz"]).unwrap_err();
        assert_eq!(err.row(), Some(2));
        assert_eq!(builder.len(), 1);
        assert_eq!(builder.finish().unwrap().get("foo"), Some("bar"));
    }

    #[test]
    fn empty_strict_is_error() {
        let err = DictionaryBuilder::strict()
            .with_origin("empty.csv")
            .finish()
            .unwrap_err();
        assert!(matches!(err, LookupError::EmptyTable { ref origin } if origin == "empty.csv"));
    }

    #[test]
    fn empty_lenient_is_allowed() {
        let dictionary = DictionaryBuilder::lenient().finish().unwrap();
        assert!(dictionary.is_empty());
    }

    #[test]
    fn blank_lines_are_located_between_records() {
        assert_eq!(blank_line_offsets(b"foo,bar\n\nnicolas,cage\n"), vec![1]);
        assert_eq!(blank_line_offsets(b"\nfoo,bar\r\n\r\n"), vec![0, 1]);
        assert!(blank_line_offsets(b"foo,bar\nnicolas,cage\n").is_empty());
    }

    #[test]
    fn blank_lines_inside_quotes_belong_to_the_field() {
        assert!(blank_line_offsets(b"\"multi\n\nline\",value\n").is_empty());
    }
}
