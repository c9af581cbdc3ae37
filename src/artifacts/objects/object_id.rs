//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. They uniquely
//! identify every loose object (blobs, trees, commits, tags).
//!
//! ## Storage
//!
//! Objects are stored in `.git/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_DIR_LENGTH, OBJECT_ID_LENGTH, RAW_HASH_LENGTH};
use crate::errors::DepsError;
use std::path::PathBuf;

/// Object identifier (SHA-1 hash)
///
/// A validated 40-character lowercase hexadecimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character lowercase hexadecimal string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or `InvalidObjectId` if the length or characters are wrong
    pub fn try_parse(id: impl Into<String>) -> Result<Self, DepsError> {
        let id = id.into();

        if id.len() != OBJECT_ID_LENGTH {
            return Err(DepsError::InvalidObjectId {
                id,
                reason: "expected 40 characters",
            });
        }
        if !is_lower_hex(&id) {
            return Err(DepsError::InvalidObjectId {
                id,
                reason: "expected lowercase hexadecimal characters",
            });
        }

        Ok(Self(id))
    }

    /// Join an object directory name and file name back into an object ID
    ///
    /// Returns `None` unless the directory is 2 hex characters and the file
    /// name is the remaining 38.
    pub fn from_parts(dir: &str, file: &str) -> Option<Self> {
        if dir.len() != OBJECT_DIR_LENGTH || file.len() != OBJECT_ID_LENGTH - OBJECT_DIR_LENGTH {
            return None;
        }

        Self::try_parse(format!("{dir}{file}")).ok()
    }

    /// Build an object ID from the 20 raw hash bytes found in tree entries
    pub fn from_raw(hash: &[u8; RAW_HASH_LENGTH]) -> Self {
        let hex40 = hash.iter().map(|byte| format!("{byte:02x}")).collect();
        Self(hex40)
    }

    /// Convert back to the 20 raw hash bytes
    pub fn to_raw(&self) -> [u8; RAW_HASH_LENGTH] {
        let mut raw = [0; RAW_HASH_LENGTH];
        for (i, byte) in raw.iter_mut().enumerate() {
            // validated on construction, every pair is a hex byte
            *byte = u8::from_str_radix(&self.0[i * 2..i * 2 + 2], 16).unwrap_or_default();
        }
        raw
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(OBJECT_DIR_LENGTH);
        PathBuf::from(dir).join(file)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

pub(crate) fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|c| matches!(c, b'0'..=b'9' | b'a'..=b'f'))
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
