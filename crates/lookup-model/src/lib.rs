//! Shared data model for the lookup enrichment stage.
//!
//! - **path**: dotted field paths into nested records
//! - **dictionary**: the immutable key/value table built from a lookup file
//! - **config**: stage settings, read from TOML and layered with CLI flags
//! - **event**: the tagged unit a pipeline hands to the stage

pub mod config;
pub mod dictionary;
pub mod error;
pub mod event;
pub mod path;

pub use config::{LookupConfig, Strictness, TagOptions};
pub use dictionary::Dictionary;
pub use error::{LookupError, Result};
pub use event::{Event, Record};
pub use path::FieldPath;
