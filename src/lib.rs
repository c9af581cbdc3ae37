//! Commit to file-name dependency graphs, read straight from a repository's
//! loose object store.
//!
//! - `areas`: the object database and the repository wrapping it
//! - `artifacts`: object decoding, graph building, extraction strategies, diagrams
//! - `commands`: the `diagram`, `list` and `render` operations
//! - `errors`: the error taxonomy shared by all of the above

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
