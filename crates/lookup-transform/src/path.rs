//! Traversal of nested records.
//!
//! Paths are walked iteratively, one map per segment. A segment whose value
//! is not a map ends the walk the same way a missing segment does: the
//! location is "not found", never a type error.

use serde_json::{Map, Value};

use lookup_model::{FieldPath, Record};

/// What to do when an intermediate map along a path does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingParents {
    /// Stop: the location is not found.
    Skip,
    /// Insert an empty map and keep walking.
    Create,
}

/// Return the map holding `path.leaf()`, if every parent is a map.
pub fn dig<'a>(record: &'a Record, path: &FieldPath) -> Option<&'a Record> {
    let mut current = record;
    for segment in path.parents() {
        current = current.get(segment)?.as_object()?;
    }
    Some(current)
}

/// Mutable counterpart of [`dig`].
///
/// With [`MissingParents::Create`] absent parents are inserted as empty
/// maps. An existing non-map value is never replaced, so the walk still
/// fails on it.
pub fn dig_mut<'a>(
    record: &'a mut Record,
    path: &FieldPath,
    missing: MissingParents,
) -> Option<&'a mut Record> {
    let mut current = record;
    for segment in path.parents() {
        if missing == MissingParents::Create && !current.contains_key(segment) {
            current.insert(segment.clone(), Value::Object(Map::new()));
        }
        current = current.get_mut(segment)?.as_object_mut()?;
    }
    Some(current)
}

/// Value at `path`, if present.
pub fn get<'a>(record: &'a Record, path: &FieldPath) -> Option<&'a Value> {
    dig(record, path)?.get(path.leaf())
}
