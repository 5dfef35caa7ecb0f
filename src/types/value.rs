//! NBT value types.

use std::fmt;

use super::{Compound, List, TagType};

/// A single NBT value. Every kind except `end` has a variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(Long),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<Long>),
}

impl Tag {
    /// Returns the kind of this value.
    pub fn tag_type(&self) -> TagType {
        match self {
            Self::Byte(_) => TagType::Byte,
            Self::Short(_) => TagType::Short,
            Self::Int(_) => TagType::Int,
            Self::Long(_) => TagType::Long,
            Self::Float(_) => TagType::Float,
            Self::Double(_) => TagType::Double,
            Self::ByteArray(_) => TagType::ByteArray,
            Self::String(_) => TagType::String,
            Self::List(_) => TagType::List,
            Self::Compound(_) => TagType::Compound,
            Self::IntArray(_) => TagType::IntArray,
            Self::LongArray(_) => TagType::LongArray,
        }
    }

    /// Returns the value as a string reference, if it is a `String` variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Widens any integer variant (`Byte`, `Short`, `Int`, `Long`) to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Byte(v) => Some(i64::from(*v)),
            Self::Short(v) => Some(i64::from(*v)),
            Self::Int(v) => Some(i64::from(*v)),
            Self::Long(v) => Some(v.get()),
            _ => None,
        }
    }

    /// Widens `Float` and `Double` to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(f64::from(*v)),
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Self::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Self::Compound(c) => Some(c),
            _ => None,
        }
    }
}

/// A signed 64-bit integer that can also be viewed as an exact
/// `(upper, lower)` pair of signed 32-bit halves, the order in which the
/// halves appear on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Long(i64);

impl Long {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Builds a long from its upper and lower 32-bit halves.
    ///
    /// `lower` is taken as raw bits, so `from_parts(0, -1)` is `0xFFFF_FFFF`.
    pub const fn from_parts(upper: i32, lower: i32) -> Self {
        Self(((upper as i64) << 32) | (lower as u32 as i64))
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    pub const fn upper(self) -> i32 {
        (self.0 >> 32) as i32
    }

    pub const fn lower(self) -> i32 {
        self.0 as i32
    }

    /// Returns `(upper, lower)`.
    pub const fn parts(self) -> (i32, i32) {
        (self.upper(), self.lower())
    }
}

impl From<i64> for Long {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

impl From<Long> for i64 {
    fn from(v: Long) -> Self {
        v.0
    }
}

impl From<(i32, i32)> for Long {
    fn from((upper, lower): (i32, i32)) -> Self {
        Self::from_parts(upper, lower)
    }
}

impl fmt::Display for Long {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The outermost artifact of an archive: a named compound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootTag {
    pub name: String,
    pub value: Compound,
}

impl RootTag {
    pub fn new(name: impl Into<String>, value: Compound) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

// -- Convenience conversions --

impl From<i8> for Tag {
    fn from(v: i8) -> Self {
        Self::Byte(v)
    }
}

impl From<i16> for Tag {
    fn from(v: i16) -> Self {
        Self::Short(v)
    }
}

impl From<i32> for Tag {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Tag {
    fn from(v: i64) -> Self {
        Self::Long(Long(v))
    }
}

impl From<Long> for Tag {
    fn from(v: Long) -> Self {
        Self::Long(v)
    }
}

impl From<f32> for Tag {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Tag {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<Vec<i8>> for Tag {
    fn from(v: Vec<i8>) -> Self {
        Self::ByteArray(v)
    }
}

impl From<Vec<i32>> for Tag {
    fn from(v: Vec<i32>) -> Self {
        Self::IntArray(v)
    }
}

impl From<Vec<Long>> for Tag {
    fn from(v: Vec<Long>) -> Self {
        Self::LongArray(v)
    }
}

impl From<List> for Tag {
    fn from(l: List) -> Self {
        Self::List(l)
    }
}

impl From<Compound> for Tag {
    fn from(c: Compound) -> Self {
        Self::Compound(c)
    }
}

pub(crate) fn write_seq<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    suffix: &str,
) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}{suffix}")?;
    }
    write!(f, "]")
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(v) => write!(f, "{v}b"),
            Self::Short(v) => write!(f, "{v}s"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}L"),
            Self::Float(v) => write!(f, "{v}f"),
            Self::Double(v) => write!(f, "{v}d"),
            Self::ByteArray(v) => write!(f, "<{} bytes>", v.len()),
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(l) => write!(f, "{l}"),
            Self::Compound(c) => write!(f, "{c}"),
            Self::IntArray(v) => write_seq(f, v, ""),
            Self::LongArray(v) => write_seq(f, v, "L"),
        }
    }
}
