//! Loose object types and decoding
//!
//! Every loose object inflates to `<type> <size>\0<content>`. Only two kinds
//! are decoded further:
//!
//! - **Commit**: yields the referenced tree
//! - **Tree**: yields the ordered entry names
//!
//! Blobs, tags and unknown kinds are classified and otherwise left alone.

pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod raw_object;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes, as stored in tree entries
pub const RAW_HASH_LENGTH: usize = 20;

/// Length of the fan-out directory name under `objects/`
pub const OBJECT_DIR_LENGTH: usize = 2;
