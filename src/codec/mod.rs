//! NBT binary codec: cursor-based reader and writer.
//!
//! All multi-byte values are big-endian; there is no padding or alignment.
//!
//! ```text
//! Root         := TypeCode(=10) String CompoundBody
//! CompoundBody := (TypeCode String Payload)* TypeCode(=0)
//! List         := TypeCode Int32(count) Payload{count}
//! String       := UInt16(byteLen) UTF8{byteLen}
//! Long         := Int32(upper) Int32(lower)
//! ```

mod cursor;
pub mod reader;
pub mod text;
pub mod writer;

pub use cursor::ByteCursor;
pub use reader::Reader;
pub use writer::Writer;

use bytes::Bytes;

use crate::error::NbtError;
use crate::types::{Compound, List, RootTag, Tag};

/// Decodes an uncompressed archive.
///
/// Any failure (wrong top-level type, truncation, corrupt lengths, unknown
/// type codes) is reported as [`NbtError::Malformed`]; no partial tree is
/// ever returned. Bytes after the root compound are ignored.
pub fn parse_uncompressed(data: &[u8]) -> Result<RootTag, NbtError> {
    Reader::new(data).root().map_err(NbtError::into_malformed)
}

/// Like [`parse_uncompressed`], with a custom nesting limit.
pub fn parse_uncompressed_with_depth(data: &[u8], max_depth: usize) -> Result<RootTag, NbtError> {
    Reader::new(data)
        .max_depth(max_depth)
        .root()
        .map_err(NbtError::into_malformed)
}

/// Encodes `root` as an uncompressed archive.
///
/// The tree is checked first: strings must fit a 16-bit byte length and
/// arrays and lists a 32-bit signed count.
pub fn write_uncompressed(root: &RootTag) -> Result<Bytes, NbtError> {
    check_string(&root.name)?;
    check_compound(&root.value)?;
    let mut writer = Writer::new();
    writer.root(root);
    Ok(writer.into_bytes())
}

fn check_string(s: &str) -> Result<(), NbtError> {
    let len = s.len();
    if len > usize::from(u16::MAX) {
        return Err(NbtError::InvalidTag(format!(
            "string of {len} bytes exceeds {} bytes",
            u16::MAX
        )));
    }
    Ok(())
}

fn check_count(len: usize) -> Result<(), NbtError> {
    if i32::try_from(len).is_err() {
        return Err(NbtError::InvalidTag(format!(
            "{len} elements exceed the 32-bit length prefix"
        )));
    }
    Ok(())
}

fn check_compound(compound: &Compound) -> Result<(), NbtError> {
    for (name, tag) in compound.iter() {
        check_string(name)?;
        check_tag(tag)?;
    }
    Ok(())
}

fn check_tag(tag: &Tag) -> Result<(), NbtError> {
    match tag {
        Tag::ByteArray(v) => check_count(v.len()),
        Tag::IntArray(v) => check_count(v.len()),
        Tag::LongArray(v) => check_count(v.len()),
        Tag::String(s) => check_string(s),
        Tag::List(l) => check_list(l),
        Tag::Compound(c) => check_compound(c),
        Tag::Byte(_)
        | Tag::Short(_)
        | Tag::Int(_)
        | Tag::Long(_)
        | Tag::Float(_)
        | Tag::Double(_) => Ok(()),
    }
}

fn check_list(list: &List) -> Result<(), NbtError> {
    check_count(list.len())?;
    match list {
        List::ByteArray(items) => items.iter().try_for_each(|v| check_count(v.len())),
        List::IntArray(items) => items.iter().try_for_each(|v| check_count(v.len())),
        List::LongArray(items) => items.iter().try_for_each(|v| check_count(v.len())),
        List::String(items) => items.iter().try_for_each(|s| check_string(s)),
        List::List(items) => items.iter().try_for_each(check_list),
        List::Compound(items) => items.iter().try_for_each(check_compound),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Long, TagType};

    fn sample() -> RootTag {
        let mut egg = Compound::new();
        egg.insert("name", "Eggbert");
        egg.insert("value", 0.5f32);

        let mut nested = Compound::new();
        nested.insert("egg", egg);

        let mut value = Compound::new();
        value.insert("byteTest", 127i8);
        value.insert("shortTest", 32767i16);
        value.insert("intTest", 2147483647i32);
        value.insert("longTest", Long::new(9223372036854775807));
        value.insert("floatTest", 0.4982315f32);
        value.insert("doubleTest", 0.4931287132182315f64);
        value.insert("stringTest", "HELLO WORLD THIS IS A TEST STRING ÅÄÖ!");
        value.insert("byteArrayTest", vec![0i8, 62, 34, 16, -8]);
        value.insert("intArrayTest", vec![i32::MIN, 0, i32::MAX]);
        value.insert("longArrayTest", vec![Long::from_parts(1, 2), Long::new(-1)]);
        value.insert("listTest (long)", List::Long(vec![Long::new(11), Long::new(12)]));
        value.insert(
            "listTest (compound)",
            List::Compound(vec![
                [("name", "Compound tag #0")].into_iter().collect(),
                [("name", "Compound tag #1")].into_iter().collect(),
            ]),
        );
        value.insert("emptyList", List::empty(TagType::String));
        value.insert("endList", List::End);
        value.insert("nested compound test", nested);
        RootTag::new("Level", value)
    }

    #[test]
    fn round_trip() {
        let root = sample();
        let bytes = write_uncompressed(&root).unwrap();
        let decoded = parse_uncompressed(&bytes).unwrap();
        assert_eq!(decoded, root);

        // Insertion order survives, so re-encoding is byte-identical.
        assert_eq!(
            decoded.value.keys().collect::<Vec<_>>(),
            root.value.keys().collect::<Vec<_>>()
        );
        assert_eq!(write_uncompressed(&decoded).unwrap(), bytes);
    }

    #[test]
    fn encodes_fixed_bytes() {
        let mut value = Compound::new();
        value.insert("aa", Tag::Byte(1));
        value.insert("bb", List::Byte(vec![1, 2, 3]));
        let bytes = write_uncompressed(&RootTag::new("", value)).unwrap();
        assert_eq!(
            &bytes[..],
            &[
                0x0A, 0x00, 0x00, // root header, empty name
                0x01, 0x00, 0x02, 0x61, 0x61, 0x01, //
                0x09, 0x00, 0x02, 0x62, 0x62, 0x01, 0x00, 0x00, 0x00, 0x03, 0x01, 0x02, 0x03,
                0x00,
            ]
        );
    }

    #[test]
    fn empty_list_round_trips_with_type() {
        let mut value = Compound::new();
        value.insert("xs", List::empty(TagType::Double));
        let root = RootTag::new("r", value);
        let decoded = parse_uncompressed(&write_uncompressed(&root).unwrap()).unwrap();
        let list = decoded.value.get("xs").and_then(Tag::as_list).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.element_type(), TagType::Double);
    }

    #[test]
    fn top_level_must_be_compound() {
        let err = parse_uncompressed(&[8, 0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, NbtError::Malformed(_)));
    }

    #[test]
    fn truncation_is_malformed() {
        let bytes = write_uncompressed(&sample()).unwrap();
        for cut in [0, 1, 3, bytes.len() / 2, bytes.len() - 1] {
            let err = parse_uncompressed(&bytes[..cut]).unwrap_err();
            assert!(matches!(err, NbtError::Malformed(_)), "cut {cut}: {err:?}");
        }
    }

    #[test]
    fn unknown_type_is_malformed_at_top_level() {
        let err = parse_uncompressed(&[10, 0, 0, 0x63, 0, 0]).unwrap_err();
        assert!(matches!(err, NbtError::Malformed(_)));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut bytes = write_uncompressed(&sample()).unwrap().to_vec();
        bytes.extend_from_slice(&[0xDE, 0xAD]);
        assert_eq!(parse_uncompressed(&bytes).unwrap(), sample());
    }

    #[test]
    fn depth_limit_applies() {
        let mut inner = Compound::new();
        inner.insert("leaf", 1i8);
        let mut value = Compound::new();
        value.insert("inner", inner);
        let bytes = write_uncompressed(&RootTag::new("", value)).unwrap();
        assert!(parse_uncompressed_with_depth(&bytes, 2).is_ok());
        assert!(parse_uncompressed_with_depth(&bytes, 1).is_err());
    }

    #[test]
    fn oversized_string_is_rejected() {
        let mut value = Compound::new();
        value.insert("s", "x".repeat(usize::from(u16::MAX) + 1));
        let err = write_uncompressed(&RootTag::new("", value)).unwrap_err();
        assert!(matches!(err, NbtError::InvalidTag(_)));

        let long_name = "n".repeat(70_000);
        let err = write_uncompressed(&RootTag::new(long_name, Compound::new())).unwrap_err();
        assert!(matches!(err, NbtError::InvalidTag(_)));
    }

    #[test]
    fn max_length_string_is_accepted() {
        let mut value = Compound::new();
        value.insert("s", "x".repeat(usize::from(u16::MAX)));
        let root = RootTag::new("", value);
        let bytes = write_uncompressed(&root).unwrap();
        assert_eq!(parse_uncompressed(&bytes).unwrap(), root);
    }
}
