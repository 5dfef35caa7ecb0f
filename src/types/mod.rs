//! NBT tag kinds and the in-memory tag tree.

mod compound;
mod kind;
mod list;
mod value;

pub use compound::Compound;
pub use kind::TagType;
pub use list::List;
pub use value::{Long, RootTag, Tag};
