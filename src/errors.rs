//! Error taxonomy
//!
//! Only `RepositoryNotFound`, `RendererInvocation` and `GitLog` end a run.
//! The per-object variants are collected as diagnostics by the graph builder
//! while the rest of the store keeps being decoded.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DepsError {
    /// No `.git/objects` directory at the given repository root
    #[error("no object store found at {}", .path.display())]
    RepositoryNotFound { path: PathBuf },

    /// One loose object could not be read, inflated or classified
    #[error("unable to read object {oid}: {reason}")]
    ObjectRead { oid: ObjectId, reason: String },

    #[error("commit {oid} does not reference a tree")]
    CommitMissingTree { oid: ObjectId },

    /// Malformed tree body; `offset` is the byte position inside the body
    #[error("malformed tree {oid} at byte {offset}: {reason}")]
    TreeParse {
        oid: ObjectId,
        offset: usize,
        reason: &'static str,
    },

    #[error("renderer {} failed: {reason}", .executable.display())]
    RendererInvocation { executable: PathBuf, reason: String },

    #[error("git log failed for {}: {reason}", .path.display())]
    GitLog { path: PathBuf, reason: String },

    #[error("invalid object id {id:?}: {reason}")]
    InvalidObjectId { id: String, reason: &'static str },
}
