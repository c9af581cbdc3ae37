//! Strategies that turn a repository into a dependency graph
//!
//! - `object_store`: decodes loose objects directly
//! - `git_log`: parses `git log --name-only` output
//!
//! Both sit behind [`DependencyExtractor`] and are picked once, from
//! configuration, through [`Strategy`].

use crate::artifacts::graph::builder::Extraction;
use crate::errors::DepsError;
use clap::ValueEnum;
use std::path::Path;

pub mod git_log;
pub mod object_store;

pub use git_log::GitLogExtractor;
pub use object_store::ObjectStoreExtractor;

pub trait DependencyExtractor {
    /// Build the commit -> file names mapping for the repository at `repo_path`
    fn resolve(&self, repo_path: &Path) -> Result<Extraction, DepsError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Decode `.git/objects` directly; commits come in object store order
    #[default]
    ObjectStore,
    /// Run `git log --name-only`; commits come newest first
    GitLog,
}

impl Strategy {
    pub fn extractor(self) -> Box<dyn DependencyExtractor> {
        match self {
            Strategy::ObjectStore => Box::new(ObjectStoreExtractor),
            Strategy::GitLog => Box::new(GitLogExtractor::default()),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => Ok(()),
        }
    }
}
