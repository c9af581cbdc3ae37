//! Decompressed loose object
//!
//! Every loose object inflates to `<kind> <size>\0<body>`. The classifier
//! splits header from body at the first NUL and reads the kind from the
//! first space-delimited header token.

use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
    kind: ObjectType,
    /// Full inflated content, header included
    content: Bytes,
    /// Offset of the first body byte (one past the NUL)
    body_start: usize,
}

impl RawObject {
    /// Build an object of the given kind around a body, prefixing the header
    pub fn new(kind: ObjectType, body: &[u8]) -> Self {
        let mut content = format!("{} {}\0", kind.as_str(), body.len()).into_bytes();
        let body_start = content.len();
        content.extend_from_slice(body);

        RawObject {
            kind,
            content: content.into(),
            body_start,
        }
    }

    /// Classify inflated object content
    ///
    /// Fails when there is no NUL, the header has no size token, or the
    /// declared size differs from the number of body bytes.
    pub fn parse(content: Bytes) -> anyhow::Result<Self> {
        let nul = content
            .iter()
            .position(|&b| b == b'\0')
            .context("missing NUL after object header")?;

        let header = std::str::from_utf8(&content[..nul]).context("object header is not ASCII")?;
        let (kind, size) = header
            .split_once(' ')
            .context("object header has no size")?;
        let declared_size = size
            .parse::<usize>()
            .with_context(|| format!("invalid object size {size:?}"))?;

        let body_len = content.len() - nul - 1;
        if declared_size != body_len {
            anyhow::bail!("header declares {declared_size} bytes but body holds {body_len}");
        }

        Ok(RawObject {
            kind: ObjectType::from(kind),
            body_start: nul + 1,
            content,
        })
    }

    pub fn kind(&self) -> &ObjectType {
        &self.kind
    }

    /// Header bytes without the trailing NUL
    pub fn header(&self) -> &[u8] {
        &self.content[..self.body_start - 1]
    }

    pub fn body(&self) -> &[u8] {
        &self.content[self.body_start..]
    }
}

impl Packable for RawObject {
    fn serialize(&self) -> Bytes {
        self.content.clone()
    }
}

impl Object for RawObject {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn splits_header_from_body() {
        let raw = RawObject::parse(Bytes::from_static(b"blob 5\0hello")).unwrap();

        assert_eq!(raw.kind(), &ObjectType::Blob);
        assert_eq!(raw.header(), b"blob 5");
        assert_eq!(raw.body(), b"hello");
    }

    #[test]
    fn body_may_contain_nul_bytes() {
        let raw = RawObject::parse(Bytes::from_static(b"tree 3\0a\0b")).unwrap();

        assert_eq!(raw.kind(), &ObjectType::Tree);
        assert_eq!(raw.body(), b"a\0b");
    }

    #[test]
    fn unknown_kinds_pass_through() {
        let raw = RawObject::parse(Bytes::from_static(b"note 0\0")).unwrap();

        assert_eq!(raw.kind(), &ObjectType::Other("note".to_string()));
        assert!(raw.body().is_empty());
    }

    #[rstest]
    #[case::no_nul(&b"commit 4 tree"[..])]
    #[case::no_size(&b"commit\0tree"[..])]
    #[case::bad_size(&b"commit x\0tree"[..])]
    #[case::short_body(&b"commit 10\0tree"[..])]
    #[case::long_body(&b"commit 2\0tree"[..])]
    fn rejects_malformed_headers(#[case] content: &'static [u8]) {
        assert!(RawObject::parse(Bytes::from_static(content)).is_err());
    }

    #[test]
    fn new_writes_a_header_that_parses_back() {
        let raw = RawObject::new(ObjectType::Commit, b"tree x\n");

        assert_eq!(raw.header(), b"commit 7");
        assert_eq!(RawObject::parse(raw.serialize()).unwrap(), raw);
    }
}
