//! NBT decoding: bytes → tag tree.

use bytes::Buf;

use super::ByteCursor;
use super::text;
use crate::error::NbtError;
use crate::types::{Compound, List, Long, RootTag, Tag, TagType};

/// Default limit on list/compound nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Upper bound, in bytes, on what a single length prefix may reserve up front.
const MAX_PREALLOC_BYTES: usize = 64 * 1024;

/// Number of `T`s to reserve for `count` claimed elements with `remaining`
/// input bytes left. Larger lists grow as their elements actually decode.
fn prealloc_len<T>(count: usize, remaining: usize) -> usize {
    let budget = remaining.min(MAX_PREALLOC_BYTES);
    count.min(budget / std::mem::size_of::<T>().max(1))
}

/// Reads NBT payloads from a byte slice, big-endian, at a movable cursor.
///
/// Reading past the end of the slice yields [`NbtError::OutOfBounds`];
/// corrupt length prefixes and unknown type codes are reported as errors,
/// never as partial values.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum list/compound nesting depth.
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    /// Bytes left between the cursor and the end of the input.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], NbtError> {
        let remaining = self.remaining();
        if n > remaining || self.offset > self.data.len() {
            return Err(NbtError::OutOfBounds {
                offset: self.offset,
                needed: n,
                remaining,
            });
        }
        let start = self.offset;
        self.offset += n;
        Ok(&self.data[start..start + n])
    }

    /// Reads a 32-bit length prefix for `count` elements of `element` kind.
    fn count(&mut self, element: TagType) -> Result<usize, NbtError> {
        let start = self.offset;
        let count = self.int()?;
        if count < 0 {
            return Err(NbtError::Malformed(format!(
                "negative length {count} at offset {start}"
            )));
        }
        let count = count as usize;
        if element == TagType::End && count > 0 {
            return Err(NbtError::Malformed(format!(
                "list of end tags with {count} elements at offset {start}"
            )));
        }
        if count.saturating_mul(element.min_payload_len()) > self.remaining() {
            return Err(NbtError::Malformed(format!(
                "length {count} at offset {start} exceeds remaining input ({} bytes)",
                self.remaining()
            )));
        }
        Ok(count)
    }

    fn repeat<T>(
        &mut self,
        count: usize,
        mut read: impl FnMut(&mut Self) -> Result<T, NbtError>,
    ) -> Result<Vec<T>, NbtError> {
        let mut items = Vec::with_capacity(prealloc_len::<T>(count, self.remaining()));
        for _ in 0..count {
            items.push(read(self)?);
        }
        Ok(items)
    }

    fn nested<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, NbtError>,
    ) -> Result<T, NbtError> {
        if self.depth >= self.max_depth {
            return Err(NbtError::Malformed(format!(
                "nesting deeper than {} at offset {}",
                self.max_depth, self.offset
            )));
        }
        self.depth += 1;
        let result = read(self);
        self.depth -= 1;
        result
    }

    /// Reads a one-byte type code.
    pub fn tag_type(&mut self) -> Result<TagType, NbtError> {
        TagType::try_from(self.ubyte()?)
    }

    pub fn byte(&mut self) -> Result<i8, NbtError> {
        Ok(self.take(1)?.get_i8())
    }

    pub fn ubyte(&mut self) -> Result<u8, NbtError> {
        Ok(self.take(1)?.get_u8())
    }

    pub fn short(&mut self) -> Result<i16, NbtError> {
        Ok(self.take(2)?.get_i16())
    }

    pub fn int(&mut self) -> Result<i32, NbtError> {
        Ok(self.take(4)?.get_i32())
    }

    /// Reads the upper half, then the lower half.
    pub fn long(&mut self) -> Result<Long, NbtError> {
        let upper = self.int()?;
        let lower = self.int()?;
        Ok(Long::from_parts(upper, lower))
    }

    pub fn float(&mut self) -> Result<f32, NbtError> {
        Ok(self.take(4)?.get_f32())
    }

    pub fn double(&mut self) -> Result<f64, NbtError> {
        Ok(self.take(8)?.get_f64())
    }

    pub fn byte_array(&mut self) -> Result<Vec<i8>, NbtError> {
        let count = self.count(TagType::Byte)?;
        Ok(self.take(count)?.iter().map(|b| *b as i8).collect())
    }

    pub fn int_array(&mut self) -> Result<Vec<i32>, NbtError> {
        let count = self.count(TagType::Int)?;
        self.repeat(count, Self::int)
    }

    pub fn long_array(&mut self) -> Result<Vec<Long>, NbtError> {
        let count = self.count(TagType::Long)?;
        self.repeat(count, Self::long)
    }

    /// Reads an unsigned 16-bit byte length, then that many UTF-8 bytes.
    pub fn string(&mut self) -> Result<String, NbtError> {
        let len = usize::from(self.take(2)?.get_u16());
        text::decode(self.take(len)?)
    }

    /// Reads the element type, the element count, then every element.
    pub fn list(&mut self) -> Result<List, NbtError> {
        let element = self.tag_type()?;
        let count = self.count(element)?;
        self.nested(|r| {
            Ok(match element {
                TagType::End => List::End,
                TagType::Byte => List::Byte(r.repeat(count, Self::byte)?),
                TagType::Short => List::Short(r.repeat(count, Self::short)?),
                TagType::Int => List::Int(r.repeat(count, Self::int)?),
                TagType::Long => List::Long(r.repeat(count, Self::long)?),
                TagType::Float => List::Float(r.repeat(count, Self::float)?),
                TagType::Double => List::Double(r.repeat(count, Self::double)?),
                TagType::ByteArray => List::ByteArray(r.repeat(count, Self::byte_array)?),
                TagType::String => List::String(r.repeat(count, Self::string)?),
                TagType::List => List::List(r.repeat(count, Self::list)?),
                TagType::Compound => List::Compound(r.repeat(count, Self::compound)?),
                TagType::IntArray => List::IntArray(r.repeat(count, Self::int_array)?),
                TagType::LongArray => List::LongArray(r.repeat(count, Self::long_array)?),
            })
        })
    }

    /// Reads `(type, name, payload)` entries until an `end` type code.
    ///
    /// Running out of input before the `end` code is an error. A repeated
    /// name replaces the earlier value.
    pub fn compound(&mut self) -> Result<Compound, NbtError> {
        self.nested(|r| {
            let mut compound = Compound::new();
            loop {
                let kind = r.tag_type()?;
                if kind == TagType::End {
                    break;
                }
                let name = r.string()?;
                let value = r.payload(kind)?;
                compound.insert(name, value);
            }
            Ok(compound)
        })
    }

    /// Reads a payload of the given kind.
    pub fn payload(&mut self, kind: TagType) -> Result<Tag, NbtError> {
        Ok(match kind {
            TagType::End => {
                return Err(NbtError::Malformed(format!(
                    "end tag has no payload (offset {})",
                    self.offset
                )));
            }
            TagType::Byte => Tag::Byte(self.byte()?),
            TagType::Short => Tag::Short(self.short()?),
            TagType::Int => Tag::Int(self.int()?),
            TagType::Long => Tag::Long(self.long()?),
            TagType::Float => Tag::Float(self.float()?),
            TagType::Double => Tag::Double(self.double()?),
            TagType::ByteArray => Tag::ByteArray(self.byte_array()?),
            TagType::String => Tag::String(self.string()?),
            TagType::List => Tag::List(self.list()?),
            TagType::Compound => Tag::Compound(self.compound()?),
            TagType::IntArray => Tag::IntArray(self.int_array()?),
            TagType::LongArray => Tag::LongArray(self.long_array()?),
        })
    }

    /// Reads a complete archive: `compound` type code, root name, body.
    pub fn root(&mut self) -> Result<RootTag, NbtError> {
        let code = self.ubyte()?;
        if code != TagType::Compound.code() {
            return Err(NbtError::Malformed(format!(
                "top-level tag must be a compound, found type code {code}"
            )));
        }
        let name = self.string()?;
        let value = self.compound()?;
        Ok(RootTag { name, value })
    }
}

impl ByteCursor for Reader<'_> {
    fn offset(&self) -> usize {
        self.offset
    }

    fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }
}
