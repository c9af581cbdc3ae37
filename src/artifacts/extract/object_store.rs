use crate::areas::database::Database;
use crate::artifacts::extract::DependencyExtractor;
use crate::artifacts::graph::builder::{Extraction, GraphBuilder};
use crate::errors::DepsError;
use std::path::Path;

/// Reads commits and their top-level trees straight from the loose objects
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectStoreExtractor;

impl DependencyExtractor for ObjectStoreExtractor {
    fn resolve(&self, repo_path: &Path) -> Result<Extraction, DepsError> {
        let database = Database::new(repo_path.join(".git").join("objects").into_boxed_path());

        let builder = database
            .locate()?
            .fold(GraphBuilder::new(), |builder, oid| builder.visit(&database, oid));

        Ok(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object_id::ObjectId;
    use crate::artifacts::objects::object_type::ObjectType;
    use crate::artifacts::objects::raw_object::RawObject;
    use crate::artifacts::objects::tree::{TreeEntry, TreeRecord};
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    struct Store {
        dir: TempDir,
        database: Database,
    }

    impl Store {
        fn blob(&self, content: &str) -> ObjectId {
            self.database
                .store(&RawObject::new(ObjectType::Blob, content.as_bytes()))
                .unwrap()
        }

        fn tree(&self, names: &[&str]) -> ObjectId {
            let entries = names
                .iter()
                .map(|name| TreeEntry::new("100644", *name, &self.blob(name)))
                .collect();
            self.database.store(&TreeRecord::new(entries)).unwrap()
        }

        fn commit(&self, tree: &ObjectId, message: &str) -> ObjectId {
            let body = format!(
                "tree {tree}\nauthor A <a@b.c> 1700000000 +0000\n\
                 committer A <a@b.c> 1700000000 +0000\n\n{message}\n"
            );
            self.raw(ObjectType::Commit, body.as_bytes())
        }

        fn raw(&self, kind: ObjectType, body: &[u8]) -> ObjectId {
            self.database.store(&RawObject::new(kind, body)).unwrap()
        }

        fn resolve(&self) -> Extraction {
            ObjectStoreExtractor.resolve(self.dir.path()).unwrap()
        }
    }

    #[fixture]
    fn store() -> Store {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let database = Database::new(dir.path().join(".git").join("objects").into_boxed_path());
        std::fs::create_dir_all(database.objects_path()).expect("Failed to create objects dir");
        Store { dir, database }
    }

    #[rstest]
    fn missing_object_store_is_fatal() {
        let dir = TempDir::new().unwrap();

        let err = ObjectStoreExtractor.resolve(dir.path()).unwrap_err();

        assert!(matches!(err, DepsError::RepositoryNotFound { .. }));
    }

    #[rstest]
    fn empty_store_is_an_empty_graph(store: Store) {
        let extraction = store.resolve();

        assert!(extraction.graph.is_empty());
        assert!(extraction.is_complete());
    }

    #[rstest]
    fn commit_maps_to_its_tree_entries(store: Store) {
        let tree = store.tree(&["file1.txt", "file2.txt"]);
        let commit = store.commit(&tree, "Add files");

        let extraction = store.resolve();

        assert_eq!(
            extraction.graph.get(&commit),
            Some(&["file1.txt".to_string(), "file2.txt".to_string()][..])
        );
        assert_eq!(extraction.graph.len(), 1);
    }

    #[rstest]
    fn commits_sharing_a_tree_map_to_the_same_names(store: Store) {
        let tree = store.tree(&["Cargo.toml", "src"]);
        let first = store.commit(&tree, "first");
        let second = store.commit(&tree, "second");

        let extraction = store.resolve();

        assert_eq!(extraction.graph.len(), 2);
        assert_eq!(extraction.graph.get(&first), extraction.graph.get(&second));
    }

    #[rstest]
    fn subtrees_are_not_followed(store: Store) {
        let nested = store.tree(&["inner.rs"]);
        let blob = store.blob("readme");
        let root = store
            .database
            .store(&TreeRecord::new(vec![
                TreeEntry::new("100644", "README", &blob),
                TreeEntry::new("40000", "src", &nested),
            ]))
            .unwrap();
        let commit = store.commit(&root, "nested");

        let extraction = store.resolve();

        assert_eq!(
            extraction.graph.get(&commit),
            Some(&["README".to_string(), "src".to_string()][..])
        );
    }

    #[rstest]
    fn commit_without_tree_line_is_excluded(store: Store) {
        let orphan = store.raw(ObjectType::Commit, b"author A <a@b.c> 1 +0000\n\nmsg\n");
        let tree = store.tree(&["kept.txt"]);
        let kept = store.commit(&tree, "kept");

        let extraction = store.resolve();

        assert!(!extraction.graph.contains(&orphan));
        assert!(extraction.graph.contains(&kept));
        assert_eq!(extraction.diagnostics.len(), 1);
        assert!(matches!(
            extraction.diagnostics[0].error,
            DepsError::CommitMissingTree { ref oid } if *oid == orphan
        ));
    }

    #[rstest]
    fn truncated_tree_skips_only_its_commit(store: Store) {
        let good_tree = store.tree(&["file1.txt"]);
        let good = store.commit(&good_tree, "good");

        let mut body = TreeRecord::new(vec![TreeEntry::new(
            "100644",
            "file2.txt",
            &store.blob("two"),
        )])
        .encode_body();
        body.truncate(body.len() - 5);
        let bad_tree = store.raw(ObjectType::Tree, &body);
        let bad = store.commit(&bad_tree, "bad");

        let extraction = store.resolve();

        assert_eq!(extraction.graph.get(&good), Some(&["file1.txt".to_string()][..]));
        assert!(!extraction.graph.contains(&bad));
        assert_eq!(extraction.diagnostics.len(), 1);
        assert_eq!(extraction.diagnostics[0].object, bad);
        assert!(matches!(
            extraction.diagnostics[0].error,
            DepsError::TreeParse { ref oid, .. } if *oid == bad_tree
        ));
    }

    #[rstest]
    fn corrupt_object_is_skipped(store: Store) {
        let tree = store.tree(&["file1.txt"]);
        let commit = store.commit(&tree, "ok");
        let corrupt = store
            .dir
            .path()
            .join(".git/objects/ff/ffffffffffffffffffffffffffffffffffffff");
        std::fs::create_dir_all(corrupt.parent().unwrap()).unwrap();
        std::fs::write(&corrupt, b"not zlib").unwrap();

        let extraction = store.resolve();

        assert!(extraction.graph.contains(&commit));
        assert_eq!(extraction.diagnostics.len(), 1);
        assert!(matches!(
            extraction.diagnostics[0].error,
            DepsError::ObjectRead { .. }
        ));
    }

    #[rstest]
    fn resolving_twice_gives_the_same_graph(store: Store) {
        let first_tree = store.tree(&["a.txt"]);
        let second_tree = store.tree(&["a.txt", "b.txt"]);
        store.commit(&first_tree, "one");
        store.commit(&second_tree, "two");

        assert_eq!(store.resolve().graph, store.resolve().graph);
    }
}
