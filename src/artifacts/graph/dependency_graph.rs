use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashMap;

/// Mapping from commit id to the top-level names of its tree
///
/// Iteration follows insertion order. For the object store strategy that is
/// enumeration order, not commit chronology.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    commits: Vec<(ObjectId, Vec<String>)>,
    positions: HashMap<ObjectId, usize>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the names for a commit
    ///
    /// Re-inserting a commit replaces its names but keeps its original position.
    pub fn insert(&mut self, commit: ObjectId, names: Vec<String>) {
        match self.positions.get(&commit) {
            Some(&position) => self.commits[position].1 = names,
            None => {
                self.positions.insert(commit.clone(), self.commits.len());
                self.commits.push((commit, names));
            }
        }
    }

    pub fn get(&self, commit: &ObjectId) -> Option<&[String]> {
        self.positions
            .get(commit)
            .map(|&position| self.commits[position].1.as_slice())
    }

    pub fn contains(&self, commit: &ObjectId) -> bool {
        self.positions.contains_key(commit)
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn commits(&self) -> impl Iterator<Item = &ObjectId> {
        self.commits.iter().map(|(commit, _)| commit)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &[String])> {
        self.commits
            .iter()
            .map(|(commit, names)| (commit, names.as_slice()))
    }
}

impl FromIterator<(ObjectId, Vec<String>)> for DependencyGraph {
    fn from_iter<I: IntoIterator<Item = (ObjectId, Vec<String>)>>(iter: I) -> Self {
        let mut graph = DependencyGraph::new();
        for (commit, names) in iter {
            graph.insert(commit, names);
        }
        graph
    }
}
