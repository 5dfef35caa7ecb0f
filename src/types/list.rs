//! Homogeneous list tags.

use std::fmt;

use super::value::write_seq;
use super::{Compound, Long, Tag, TagType};
use crate::error::NbtError;

/// A homogeneous list: one variant per element kind, each holding that
/// kind's payloads. An empty list keeps its element kind.
#[derive(Debug, Clone, PartialEq)]
pub enum List {
    /// The empty list of kind `end`.
    End,
    Byte(Vec<i8>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Long(Vec<Long>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    ByteArray(Vec<Vec<i8>>),
    String(Vec<String>),
    List(Vec<List>),
    Compound(Vec<Compound>),
    IntArray(Vec<Vec<i32>>),
    LongArray(Vec<Vec<Long>>),
}

macro_rules! each_list {
    ($list:expr, $items:ident => $body:expr, End => $end:expr) => {
        match $list {
            List::End => $end,
            List::Byte($items) => $body,
            List::Short($items) => $body,
            List::Int($items) => $body,
            List::Long($items) => $body,
            List::Float($items) => $body,
            List::Double($items) => $body,
            List::ByteArray($items) => $body,
            List::String($items) => $body,
            List::List($items) => $body,
            List::Compound($items) => $body,
            List::IntArray($items) => $body,
            List::LongArray($items) => $body,
        }
    };
}

impl List {
    /// Creates an empty list with the given element kind.
    pub fn empty(element: TagType) -> Self {
        match element {
            TagType::End => Self::End,
            TagType::Byte => Self::Byte(Vec::new()),
            TagType::Short => Self::Short(Vec::new()),
            TagType::Int => Self::Int(Vec::new()),
            TagType::Long => Self::Long(Vec::new()),
            TagType::Float => Self::Float(Vec::new()),
            TagType::Double => Self::Double(Vec::new()),
            TagType::ByteArray => Self::ByteArray(Vec::new()),
            TagType::String => Self::String(Vec::new()),
            TagType::List => Self::List(Vec::new()),
            TagType::Compound => Self::Compound(Vec::new()),
            TagType::IntArray => Self::IntArray(Vec::new()),
            TagType::LongArray => Self::LongArray(Vec::new()),
        }
    }

    /// Builds a list of `element` kind from dynamically typed tags.
    ///
    /// Fails if any tag is not of the declared kind, or if `element` is
    /// `end` and `tags` is non-empty.
    pub fn from_tags(
        element: TagType,
        tags: impl IntoIterator<Item = Tag>,
    ) -> Result<Self, NbtError> {
        let mut list = Self::empty(element);
        for (i, tag) in tags.into_iter().enumerate() {
            list.push(tag).map_err(|found| {
                NbtError::InvalidTag(format!(
                    "list of {element} has a {} at index {i}",
                    found.tag_type()
                ))
            })?;
        }
        Ok(list)
    }

    /// Appends `tag`, handing it back if its kind does not match the list's.
    pub fn push(&mut self, tag: Tag) -> Result<(), Tag> {
        match (self, tag) {
            (Self::Byte(v), Tag::Byte(x)) => v.push(x),
            (Self::Short(v), Tag::Short(x)) => v.push(x),
            (Self::Int(v), Tag::Int(x)) => v.push(x),
            (Self::Long(v), Tag::Long(x)) => v.push(x),
            (Self::Float(v), Tag::Float(x)) => v.push(x),
            (Self::Double(v), Tag::Double(x)) => v.push(x),
            (Self::ByteArray(v), Tag::ByteArray(x)) => v.push(x),
            (Self::String(v), Tag::String(x)) => v.push(x),
            (Self::List(v), Tag::List(x)) => v.push(x),
            (Self::Compound(v), Tag::Compound(x)) => v.push(x),
            (Self::IntArray(v), Tag::IntArray(x)) => v.push(x),
            (Self::LongArray(v), Tag::LongArray(x)) => v.push(x),
            (_, other) => return Err(other),
        }
        Ok(())
    }

    /// Returns the declared element kind.
    pub fn element_type(&self) -> TagType {
        match self {
            Self::End => TagType::End,
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

    pub fn len(&self) -> usize {
        each_list!(self, items => items.len(), End => 0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the element at `index` as a `Tag`.
    pub fn get(&self, index: usize) -> Option<Tag> {
        match self {
            Self::End => None,
            Self::Byte(v) => v.get(index).map(|x| Tag::Byte(*x)),
            Self::Short(v) => v.get(index).map(|x| Tag::Short(*x)),
            Self::Int(v) => v.get(index).map(|x| Tag::Int(*x)),
            Self::Long(v) => v.get(index).map(|x| Tag::Long(*x)),
            Self::Float(v) => v.get(index).map(|x| Tag::Float(*x)),
            Self::Double(v) => v.get(index).map(|x| Tag::Double(*x)),
            Self::ByteArray(v) => v.get(index).cloned().map(Tag::ByteArray),
            Self::String(v) => v.get(index).cloned().map(Tag::String),
            Self::List(v) => v.get(index).cloned().map(Tag::List),
            Self::Compound(v) => v.get(index).cloned().map(Tag::Compound),
            Self::IntArray(v) => v.get(index).cloned().map(Tag::IntArray),
            Self::LongArray(v) => v.get(index).cloned().map(Tag::LongArray),
        }
    }

    /// Converts the list into dynamically typed tags.
    pub fn into_tags(self) -> Vec<Tag> {
        fn wrap<T>(v: Vec<T>, f: impl Fn(T) -> Tag) -> Vec<Tag> {
            v.into_iter().map(f).collect()
        }
        match self {
            Self::End => Vec::new(),
            Self::Byte(v) => wrap(v, Tag::Byte),
            Self::Short(v) => wrap(v, Tag::Short),
            Self::Int(v) => wrap(v, Tag::Int),
            Self::Long(v) => wrap(v, Tag::Long),
            Self::Float(v) => wrap(v, Tag::Float),
            Self::Double(v) => wrap(v, Tag::Double),
            Self::ByteArray(v) => wrap(v, Tag::ByteArray),
            Self::String(v) => wrap(v, Tag::String),
            Self::List(v) => wrap(v, Tag::List),
            Self::Compound(v) => wrap(v, Tag::Compound),
            Self::IntArray(v) => wrap(v, Tag::IntArray),
            Self::LongArray(v) => wrap(v, Tag::LongArray),
        }
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::End => write!(f, "[]"),
            Self::Byte(v) => write_seq(f, v, "b"),
            Self::Short(v) => write_seq(f, v, "s"),
            Self::Int(v) => write_seq(f, v, ""),
            Self::Long(v) => write_seq(f, v, "L"),
            Self::Float(v) => write_seq(f, v, "f"),
            Self::Double(v) => write_seq(f, v, "d"),
            Self::String(v) => {
                let quoted: Vec<String> = v.iter().map(|s| format!("{s:?}")).collect();
                write_seq(f, &quoted, "")
            }
            Self::List(v) => write_seq(f, v, ""),
            Self::Compound(v) => write_seq(f, v, ""),
            // Nested arrays go through `Tag`'s formatting.
            other => {
                let tags = other.clone().into_tags();
                write_seq(f, &tags, "")
            }
        }
    }
}
