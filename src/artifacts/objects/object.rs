use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::RAW_HASH_LENGTH;
use bytes::Bytes;
use sha1::{Digest, Sha1};

pub trait Packable {
    /// Full object bytes, `<kind> <size>\0` header included
    fn serialize(&self) -> Bytes;
}

pub trait Object: Packable {
    fn object_id(&self) -> ObjectId {
        let mut hasher = Sha1::new();
        hasher.update(self.serialize());

        let mut oid = [0; RAW_HASH_LENGTH];
        oid.copy_from_slice(&hasher.finalize());
        ObjectId::from_raw(&oid)
    }
}
