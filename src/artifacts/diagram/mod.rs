//! Textual diagram serialization of a dependency graph

pub mod mermaid;
