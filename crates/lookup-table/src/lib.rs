#![deny(unsafe_code)]

//! Lookup table loading.
//!
//! A lookup file is a headerless CSV where each row maps the first column
//! to the second:
//!
//! ```text
//! nicolas,cage
//! "key, with comma",value
//! ```
//!
//! [`DictionaryBuilder`] validates rows according to a [`Strictness`] and
//! produces an immutable [`Dictionary`].

pub mod builder;

pub use builder::{DictionaryBuilder, build, load};
pub use lookup_model::{Dictionary, Strictness};
