//! Object decoding and graph extraction
//!
//! - `objects`: loose object types (raw objects, commits, trees, object ids)
//! - `graph`: the dependency graph and its builder
//! - `extract`: object store and `git log` extraction strategies
//! - `diagram`: Mermaid serialization of the graph

pub mod diagram;
pub mod extract;
pub mod graph;
pub mod objects;
