//! Tree object
//!
//! Trees list the entries of one directory snapshot. Subtrees are not
//! followed, only the top-level names are of interest.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! The hash is raw binary, so the body cannot be read line by line: every
//! entry is exactly `len(mode) + 1 + len(name) + 1 + 20` bytes.

use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::raw_object::RawObject;
use crate::artifacts::objects::RAW_HASH_LENGTH;
use crate::errors::DepsError;
use bytes::Bytes;
use std::borrow::Cow;
use thiserror::Error;

/// Mode git writes for subdirectory entries
const DIRECTORY_MODE: &str = "40000";

/// Where and why a tree body stopped making sense
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} at byte {offset}")]
pub struct TreeFormatError {
    pub offset: usize,
    pub reason: &'static str,
}

impl TreeFormatError {
    pub fn into_deps_error(self, oid: ObjectId) -> DepsError {
        DepsError::TreeParse {
            oid,
            offset: self.offset,
            reason: self.reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    mode: String,
    name: Vec<u8>,
    hash: [u8; RAW_HASH_LENGTH],
}

impl TreeEntry {
    pub fn new(mode: impl Into<String>, name: impl Into<Vec<u8>>, oid: &ObjectId) -> Self {
        TreeEntry {
            mode: mode.into(),
            name: name.into(),
            hash: oid.to_raw(),
        }
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Entry name, lossily converted when it is not valid UTF-8
    pub fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    pub fn name_bytes(&self) -> &[u8] {
        &self.name
    }

    pub fn oid(&self) -> ObjectId {
        ObjectId::from_raw(&self.hash)
    }

    pub fn is_tree(&self) -> bool {
        self.mode == DIRECTORY_MODE
    }

    fn encoded_len(&self) -> usize {
        self.mode.len() + 1 + self.name.len() + 1 + RAW_HASH_LENGTH
    }
}

/// Single forward pass over a tree body
///
/// Yields entries until the body is consumed exactly. After the first error
/// the iterator is exhausted.
#[derive(Debug)]
pub struct TreeEntries<'t> {
    body: &'t [u8],
    cursor: usize,
    failed: bool,
}

impl<'t> TreeEntries<'t> {
    pub fn new(body: &'t [u8]) -> Self {
        TreeEntries {
            body,
            cursor: 0,
            failed: false,
        }
    }

    /// Bytes up to (not including) `delimiter`, advancing past it
    fn read_until(
        &mut self,
        delimiter: u8,
        missing: &'static str,
    ) -> Result<&'t [u8], TreeFormatError> {
        let body = self.body;
        let rest = &body[self.cursor..];
        let len = rest
            .iter()
            .position(|&b| b == delimiter)
            .ok_or(TreeFormatError {
                offset: body.len(),
                reason: missing,
            })?;

        self.cursor += len + 1;
        Ok(&rest[..len])
    }

    fn read_entry(&mut self) -> Result<TreeEntry, TreeFormatError> {
        let start = self.cursor;

        let mode = self.read_until(b' ', "missing space after mode")?;
        if mode.is_empty() || !mode.iter().all(u8::is_ascii_digit) {
            return Err(TreeFormatError {
                offset: start,
                reason: "mode is not an ASCII digit string",
            });
        }

        let name = self.read_until(b'\0', "missing NUL after name")?;

        let hash = self
            .body
            .get(self.cursor..self.cursor + RAW_HASH_LENGTH)
            .ok_or(TreeFormatError {
                offset: self.cursor,
                reason: "fewer than 20 bytes left for the entry hash",
            })?;
        self.cursor += RAW_HASH_LENGTH;

        let mut raw = [0; RAW_HASH_LENGTH];
        raw.copy_from_slice(hash);

        Ok(TreeEntry {
            // checked to be ASCII digits above
            mode: String::from_utf8_lossy(mode).into_owned(),
            name: name.to_vec(),
            hash: raw,
        })
    }
}

impl Iterator for TreeEntries<'_> {
    type Item = Result<TreeEntry, TreeFormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor == self.body.len() {
            return None;
        }

        let entry = self.read_entry();
        self.failed = entry.is_err();
        Some(entry)
    }
}

/// Decoded tree object, entries in on-disk order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeRecord {
    entries: Vec<TreeEntry>,
}

impl TreeRecord {
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        TreeRecord { entries }
    }

    /// Decode a whole tree body; an empty body is an empty tree
    pub fn parse(body: &[u8]) -> Result<Self, TreeFormatError> {
        let entries = TreeEntries::new(body).collect::<Result<Vec<_>, _>>()?;
        Ok(TreeRecord { entries })
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Top-level entry names in on-disk order
    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.name().into_owned())
            .collect()
    }

    /// Body bytes in the on-disk entry layout, without the object header
    pub fn encode_body(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(self.entries.iter().map(TreeEntry::encoded_len).sum());

        for entry in &self.entries {
            body.extend_from_slice(entry.mode.as_bytes());
            body.push(b' ');
            body.extend_from_slice(&entry.name);
            body.push(b'\0');
            body.extend_from_slice(&entry.hash);
        }

        body
    }
}

impl Packable for TreeRecord {
    fn serialize(&self) -> Bytes {
        RawObject::new(ObjectType::Tree, &self.encode_body()).serialize()
    }
}

impl Object for TreeRecord {}
