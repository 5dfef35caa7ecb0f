//! NBT encoding: tag tree → bytes.

use bytes::{BufMut, Bytes, BytesMut};

use super::ByteCursor;
use crate::types::{Compound, List, Long, RootTag, Tag, TagType};

/// Writes NBT payloads into a growable, big-endian byte buffer.
///
/// Every write method returns `&mut Self` so calls can be chained. The
/// cursor may be moved anywhere with [`ByteCursor::set_offset`]; writing
/// past the current end grows the buffer and zero-fills any gap. The
/// logical output length is the high-water mark (one past the furthest
/// byte written), independent of where the cursor currently is.
///
/// ```
/// use nbtr::codec::{ByteCursor, Writer};
///
/// let mut writer = Writer::new();
/// writer.int(42).int(7);
///
/// // overwrite the first int
/// writer.set_offset(0);
/// writer.int(999);
///
/// assert_eq!(&writer.data()[..], &[0, 0, 3, 0xE7, 0, 0, 0, 7]);
/// ```
#[derive(Debug, Default)]
pub struct Writer {
    buf: BytesMut,
    offset: usize,
    high_water: usize,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer whose buffer is pre-sized to `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::zeroed(capacity),
            offset: 0,
            high_water: 0,
        }
    }

    /// Number of bytes of logical output (the high-water mark).
    pub fn len(&self) -> usize {
        self.high_water
    }

    pub fn is_empty(&self) -> bool {
        self.high_water == 0
    }

    /// Size of the internal buffer, including unused over-allocation.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns a copy of the written bytes, `[0, len())`.
    ///
    /// The internal buffer is left untouched, so writing can continue.
    pub fn data(&self) -> Bytes {
        Bytes::copy_from_slice(&self.buf[..self.high_water])
    }

    /// Consumes the writer, returning the written bytes without copying.
    pub fn into_bytes(mut self) -> Bytes {
        self.buf.truncate(self.high_water);
        self.buf.freeze()
    }

    // Grows the buffer so `size` bytes fit at the cursor. New bytes are zero.
    fn accommodate(&mut self, size: usize) {
        let end = self.offset + size;
        if end > self.buf.len() {
            let new_len = end.max(self.buf.len() * 2);
            self.buf.resize(new_len, 0);
        }
    }

    // Reserves `size` bytes at the cursor and advances past them.
    fn slot(&mut self, size: usize) -> &mut [u8] {
        self.accommodate(size);
        let start = self.offset;
        self.offset += size;
        self.high_water = self.high_water.max(self.offset);
        &mut self.buf[start..self.offset]
    }

    /// Writes a one-byte type code.
    pub fn tag_type(&mut self, kind: TagType) -> &mut Self {
        self.ubyte(kind.code())
    }

    pub fn byte(&mut self, value: i8) -> &mut Self {
        self.slot(1).put_i8(value);
        self
    }

    pub fn ubyte(&mut self, value: u8) -> &mut Self {
        self.slot(1).put_u8(value);
        self
    }

    pub fn short(&mut self, value: i16) -> &mut Self {
        self.slot(2).put_i16(value);
        self
    }

    pub fn int(&mut self, value: i32) -> &mut Self {
        self.slot(4).put_i32(value);
        self
    }

    /// Writes the upper half, then the lower half.
    pub fn long(&mut self, value: Long) -> &mut Self {
        self.int(value.upper()).int(value.lower())
    }

    pub fn float(&mut self, value: f32) -> &mut Self {
        self.slot(4).put_f32(value);
        self
    }

    pub fn double(&mut self, value: f64) -> &mut Self {
        self.slot(8).put_f64(value);
        self
    }

    pub fn byte_array(&mut self, value: &[i8]) -> &mut Self {
        self.int(value.len() as i32);
        let dst = self.slot(value.len());
        for (d, b) in dst.iter_mut().zip(value) {
            *d = *b as u8;
        }
        self
    }

    pub fn int_array(&mut self, value: &[i32]) -> &mut Self {
        self.int(value.len() as i32);
        for v in value {
            self.int(*v);
        }
        self
    }

    pub fn long_array(&mut self, value: &[Long]) -> &mut Self {
        self.int(value.len() as i32);
        for v in value {
            self.long(*v);
        }
        self
    }

    /// Writes a UTF-8 string with an unsigned 16-bit byte-length prefix.
    ///
    /// Lengths above `u16::MAX` wrap; [`write_uncompressed`] rejects such
    /// strings before they reach the writer.
    ///
    /// [`write_uncompressed`]: super::write_uncompressed
    pub fn string(&mut self, value: &str) -> &mut Self {
        let len = value.len();
        self.slot(2).put_u16(len as u16);
        self.slot(len).copy_from_slice(value.as_bytes());
        self
    }

    /// Writes the element type, the element count, then every element.
    pub fn list(&mut self, value: &List) -> &mut Self {
        self.tag_type(value.element_type()).int(value.len() as i32);
        match value {
            List::End => {}
            List::Byte(items) => {
                for v in items {
                    self.byte(*v);
                }
            }
            List::Short(items) => {
                for v in items {
                    self.short(*v);
                }
            }
            List::Int(items) => {
                for v in items {
                    self.int(*v);
                }
            }
            List::Long(items) => {
                for v in items {
                    self.long(*v);
                }
            }
            List::Float(items) => {
                for v in items {
                    self.float(*v);
                }
            }
            List::Double(items) => {
                for v in items {
                    self.double(*v);
                }
            }
            List::ByteArray(items) => {
                for v in items {
                    self.byte_array(v);
                }
            }
            List::String(items) => {
                for v in items {
                    self.string(v);
                }
            }
            List::List(items) => {
                for v in items {
                    self.list(v);
                }
            }
            List::Compound(items) => {
                for v in items {
                    self.compound(v);
                }
            }
            List::IntArray(items) => {
                for v in items {
                    self.int_array(v);
                }
            }
            List::LongArray(items) => {
                for v in items {
                    self.long_array(v);
                }
            }
        }
        self
    }

    /// Writes every entry as type code, name, payload; then an `end` code.
    pub fn compound(&mut self, value: &Compound) -> &mut Self {
        for (name, tag) in value.iter() {
            self.tag_type(tag.tag_type()).string(name).payload(tag);
        }
        self.tag_type(TagType::End)
    }

    /// Writes the payload of `tag` (without its type code or name).
    pub fn payload(&mut self, tag: &Tag) -> &mut Self {
        match tag {
            Tag::Byte(v) => self.byte(*v),
            Tag::Short(v) => self.short(*v),
            Tag::Int(v) => self.int(*v),
            Tag::Long(v) => self.long(*v),
            Tag::Float(v) => self.float(*v),
            Tag::Double(v) => self.double(*v),
            Tag::ByteArray(v) => self.byte_array(v),
            Tag::String(v) => self.string(v),
            Tag::List(v) => self.list(v),
            Tag::Compound(v) => self.compound(v),
            Tag::IntArray(v) => self.int_array(v),
            Tag::LongArray(v) => self.long_array(v),
        }
    }

    /// Writes a complete archive: `compound` type code, root name, body.
    pub fn root(&mut self, root: &RootTag) -> &mut Self {
        self.tag_type(TagType::Compound)
            .string(&root.name)
            .compound(&root.value)
    }
}

impl ByteCursor for Writer {
    fn offset(&self) -> usize {
        self.offset
    }

    fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }
}
