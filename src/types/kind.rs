//! The closed set of NBT tag kinds and their wire codes.

use std::fmt;
use std::str::FromStr;

use crate::error::NbtError;

/// One of the 13 NBT tag kinds. The discriminant is the wire type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TagType {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl TagType {
    /// Every tag kind, ordered by type code.
    pub const ALL: [TagType; 13] = [
        Self::End,
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::ByteArray,
        Self::String,
        Self::List,
        Self::Compound,
        Self::IntArray,
        Self::LongArray,
    ];

    /// Returns the wire type code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the canonical (camelCase) name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::End => "end",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::ByteArray => "byteArray",
            Self::String => "string",
            Self::List => "list",
            Self::Compound => "compound",
            Self::IntArray => "intArray",
            Self::LongArray => "longArray",
        }
    }

    /// Smallest number of bytes a payload of this kind occupies on the wire.
    ///
    /// Variable-length kinds count only their length prefix (and, for lists,
    /// the element type byte); a compound needs at least its `end` marker.
    pub const fn min_payload_len(self) -> usize {
        match self {
            Self::End => 0,
            Self::Byte => 1,
            Self::Short => 2,
            Self::Int | Self::Float => 4,
            Self::Long | Self::Double => 8,
            Self::ByteArray | Self::IntArray | Self::LongArray => 4,
            Self::String => 2,
            Self::List => 5,
            Self::Compound => 1,
        }
    }
}

impl TryFrom<u8> for TagType {
    type Error = NbtError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(NbtError::UnknownTagType(code))
    }
}

impl From<TagType> for u8 {
    fn from(kind: TagType) -> Self {
        kind.code()
    }
}

impl FromStr for TagType {
    type Err = NbtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| NbtError::InvalidTag(format!("unknown tag type name: {s:?}")))
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
