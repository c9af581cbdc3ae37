//! Commit object
//!
//! Only the referenced tree matters for the dependency graph; the rest of
//! the commit stays opaque.
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object_id::ObjectId;

const TREE_PREFIX: &[u8] = b"tree ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    tree_oid: ObjectId,
}

impl CommitRecord {
    /// Decode a commit body
    ///
    /// The first line starting with `tree ` wins, even if more follow. Returns
    /// `None` when there is no such line or its remainder is not an object id.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let tree_line = body
            .split(|&b| b == b'\n')
            .find_map(|line| line.strip_prefix(TREE_PREFIX))?;
        let tree_oid = parse_oid(tree_line)?;

        Some(CommitRecord { tree_oid })
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }
}

fn parse_oid(bytes: &[u8]) -> Option<ObjectId> {
    let id = std::str::from_utf8(bytes).ok()?;
    ObjectId::try_parse(id).ok()
}
