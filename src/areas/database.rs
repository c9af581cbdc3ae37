use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::{ObjectId, is_lower_hex};
use crate::artifacts::objects::raw_object::RawObject;
use crate::artifacts::objects::OBJECT_DIR_LENGTH;
use crate::errors::DepsError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, FilterEntry, WalkDir};

/// Loose object store rooted at `.git/objects`
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

// Only loose objects are read; packed objects are never enumerated.
impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Lazily enumerate every loose object id in the store
    ///
    /// Fan-out directories are visited in name order, and so are the files
    /// inside them. That order is stable for an unmodified store but has
    /// nothing to do with commit history.
    pub fn locate(&self) -> Result<ObjectLocator, DepsError> {
        if !self.path.is_dir() {
            return Err(DepsError::RepositoryNotFound {
                path: self.path.to_path_buf(),
            });
        }

        Ok(ObjectLocator::new(&self.path))
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Read, inflate and classify one loose object
    pub fn load(&self, object_id: &ObjectId) -> Result<RawObject, DepsError> {
        let object_path = self.path.join(object_id.to_path());

        self.read_object(object_path)
            .and_then(RawObject::parse)
            .map_err(|err| DepsError::ObjectRead {
                oid: object_id.clone(),
                reason: format!("{err:#}"),
            })
    }

    /// Write an object to the store unless it is already there
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id();
        let object_path = self.path.join(object_id.to_path());

        // write the object to disk unless it already exists
        // otherwise, create the object directory
        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object.serialize())?;
        }

        Ok(object_id)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        // read the object file
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

type FanOutFilter = fn(&DirEntry) -> bool;

/// Iterator over the loose object ids of one store
///
/// Anything that is not `<2 hex>/<38 hex>` (`info/`, `pack/`, temp files,
/// stray files at the top level) is skipped without a word.
pub struct ObjectLocator {
    walker: FilterEntry<walkdir::IntoIter, FanOutFilter>,
}

impl ObjectLocator {
    fn new(root: &Path) -> Self {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(is_fan_out_entry as FanOutFilter);

        ObjectLocator { walker }
    }
}

/// Prunes top-level entries that cannot hold loose objects
fn is_fan_out_entry(entry: &DirEntry) -> bool {
    if entry.depth() != 1 {
        return true;
    }

    let name = entry.file_name().to_string_lossy();
    entry.file_type().is_dir() && name.len() == OBJECT_DIR_LENGTH && is_lower_hex(&name)
}

impl Iterator for ObjectLocator {
    type Item = ObjectId;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.walker.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(error = %err, "skipping unreadable object store entry");
                    continue;
                }
            };

            if entry.depth() != 2 || !entry.file_type().is_file() {
                continue;
            }

            let dir = entry
                .path()
                .parent()
                .and_then(Path::file_name)
                .map(|dir| dir.to_string_lossy());
            let file = entry.file_name().to_string_lossy();

            if let Some(oid) = dir.and_then(|dir| ObjectId::from_parts(&dir, &file)) {
                return Some(oid);
            }
        }

        None
    }
}
