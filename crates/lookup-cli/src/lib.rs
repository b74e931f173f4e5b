//! Library components of the `lookup` command-line host.

pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;
