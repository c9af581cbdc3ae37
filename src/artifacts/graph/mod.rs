//! Commit to file-name mapping and the builder that accumulates it
//!
//! - `dependency_graph`: ordered commit -> entry names mapping
//! - `builder`: owns the graph under construction plus skip diagnostics

pub mod builder;
pub mod dependency_graph;
