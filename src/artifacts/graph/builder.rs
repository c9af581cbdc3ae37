use crate::areas::database::Database;
use crate::artifacts::graph::dependency_graph::DependencyGraph;
use crate::artifacts::objects::commit::CommitRecord;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::TreeRecord;
use crate::errors::DepsError;
use derive_new::new;

/// One object left out of the graph, and why
#[derive(Debug, new)]
pub struct Diagnostic {
    /// Object being decoded when the failure happened (the commit, for tree failures)
    pub object: ObjectId,
    pub error: DepsError,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.object.to_short_oid(), self.error)
    }
}

/// Result of one extraction run: the graph plus everything that was skipped
#[derive(Debug, Default)]
pub struct Extraction {
    pub graph: DependencyGraph,
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Accumulates the dependency graph one enumerated object at a time
///
/// The builder is moved through the pipeline and consumed by `finish`.
/// Per-object failures never stop it, they become diagnostics.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: DependencyGraph,
    diagnostics: Vec<Diagnostic>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one enumerated object and fold it into the graph
    ///
    /// Only commits contribute. Trees, blobs, tags and unknown kinds met
    /// during enumeration are ignored.
    pub fn visit(mut self, database: &Database, oid: ObjectId) -> Self {
        match Self::decode(database, &oid) {
            Ok(Some(names)) => self.record(oid, names),
            Ok(None) => {}
            Err(error) => self.skip(oid, error),
        }
        self
    }

    pub fn record(&mut self, commit: ObjectId, names: Vec<String>) {
        self.graph.insert(commit, names);
    }

    pub fn skip(&mut self, object: ObjectId, error: DepsError) {
        tracing::warn!(object = %object, error = %error, "skipping object");
        self.diagnostics.push(Diagnostic::new(object, error));
    }

    pub fn finish(self) -> Extraction {
        tracing::info!(
            commits = self.graph.len(),
            skipped = self.diagnostics.len(),
            "dependency graph built"
        );

        Extraction {
            graph: self.graph,
            diagnostics: self.diagnostics,
        }
    }

    /// Top-level names of a commit's tree, or `None` when `oid` is not a commit
    fn decode(database: &Database, oid: &ObjectId) -> Result<Option<Vec<String>>, DepsError> {
        let raw = database.load(oid)?;
        if raw.kind() != &ObjectType::Commit {
            return Ok(None);
        }

        let commit = CommitRecord::parse(raw.body())
            .ok_or_else(|| DepsError::CommitMissingTree { oid: oid.clone() })?;
        let tree_oid = commit.tree_oid();

        let tree = database.load(tree_oid)?;
        if tree.kind() != &ObjectType::Tree {
            return Err(DepsError::TreeParse {
                oid: tree_oid.clone(),
                offset: 0,
                reason: "referenced object is not a tree",
            });
        }

        let tree = TreeRecord::parse(tree.body())
            .map_err(|err| err.into_deps_error(tree_oid.clone()))?;

        Ok(Some(tree.names()))
    }
}
