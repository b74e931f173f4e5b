//! Record enrichment through dictionary lookups.
//!
//! - **path**: traversal of nested records along a [`FieldPath`]
//! - **transformer**: the per-record lookup in one of three strategies
//! - **tag**: prefix/suffix rewriting of event tags
//! - **stage**: tag rewriting plus enrichment, as a pipeline sees it
//!
//! [`FieldPath`]: lookup_model::FieldPath

pub mod path;
pub mod stage;
pub mod tag;
pub mod transformer;

pub use path::MissingParents;
pub use stage::LookupStage;
pub use tag::TagRewriter;
pub use transformer::{FieldTransformer, Strategy};
