use crate::artifacts::extract::DependencyExtractor;
use crate::artifacts::graph::builder::{Extraction, GraphBuilder};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::DepsError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Asks git itself for the files touched by each commit
///
/// Unlike the object store strategy, the names are the files changed by the
/// commit, and commits come in `git log` order (newest first).
#[derive(Debug, Clone)]
pub struct GitLogExtractor {
    git: PathBuf,
}

impl GitLogExtractor {
    pub fn new(git: impl Into<PathBuf>) -> Self {
        GitLogExtractor { git: git.into() }
    }

    fn run_log(&self, repo_path: &Path) -> Result<String, DepsError> {
        let failure = |reason: String| DepsError::GitLog {
            path: repo_path.to_path_buf(),
            reason,
        };

        let output = Command::new(&self.git)
            .arg("-C")
            .arg(repo_path)
            .args(["log", "--pretty=format:%H", "--name-only"])
            .output()
            .map_err(|err| failure(format!("unable to run {}: {err}", self.git.display())))?;

        if !output.status.success() {
            return Err(failure(format!(
                "{} ({})",
                String::from_utf8_lossy(&output.stderr).trim(),
                output.status
            )));
        }

        String::from_utf8(output.stdout).map_err(|err| failure(err.to_string()))
    }
}

impl Default for GitLogExtractor {
    fn default() -> Self {
        Self::new("git")
    }
}

impl DependencyExtractor for GitLogExtractor {
    fn resolve(&self, repo_path: &Path) -> Result<Extraction, DepsError> {
        let output = self.run_log(repo_path)?;
        parse_log(&output, repo_path)
    }
}

/// Parse `git log --pretty=format:%H --name-only` output
///
/// Records are separated by blank lines. The first line of a record is the
/// commit hash, the remaining lines are file names. A hash seen twice keeps
/// its first position and its latest file list.
pub fn parse_log(output: &str, repo_path: &Path) -> Result<Extraction, DepsError> {
    let mut builder = GraphBuilder::new();
    let mut current: Option<(ObjectId, Vec<String>)> = None;

    for line in output.lines().map(str::trim) {
        if line.is_empty() {
            if let Some((commit, files)) = current.take() {
                builder.record(commit, files);
            }
            continue;
        }

        if let Some((_, files)) = current.as_mut() {
            files.push(line.to_string());
            continue;
        }

        let commit = ObjectId::try_parse(line).map_err(|err| DepsError::GitLog {
            path: repo_path.to_path_buf(),
            reason: format!("unexpected commit line: {err}"),
        })?;
        current = Some((commit, Vec::new()));
    }

    if let Some((commit, files)) = current {
        builder.record(commit, files);
    }

    Ok(builder.finish())
}
