//! Repository areas
//!
//! - `database`: loose object store (locate, load, store)
//! - `repository`: repository root and the operations run against it

pub mod database;
pub mod repository;
