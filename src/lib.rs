//! nbtr — A pure-Rust codec for Named Binary Tag (NBT) archives.
//!
//! NBT is a compact, typed, length-prefixed binary encoding for tree-shaped
//! data. An archive is a single named compound, optionally wrapped in gzip.
//!
//! # Architecture
//!
//! - **`types`** — The 13 tag kinds and the in-memory tag tree
//! - **`codec`** — Cursor-based `Reader`/`Writer` and top-level encode/decode
//! - **`compress`** — Injected (async) gzip provider and header sniffing
//! - **`archive`** — `NbtCodec`, the root codec dispatching on compression
//!
//! # Example
//!
//! ```
//! use nbtr::codec::{parse_uncompressed, write_uncompressed};
//! use nbtr::types::{Compound, RootTag, Tag};
//!
//! let mut value = Compound::new();
//! value.insert("answer", Tag::Int(42));
//! let root = RootTag::new("Level", value);
//!
//! let bytes = write_uncompressed(&root).unwrap();
//! assert_eq!(parse_uncompressed(&bytes).unwrap(), root);
//! ```

pub mod archive;
pub mod codec;
pub mod compress;
pub mod error;
pub mod types;

pub use archive::NbtCodec;
pub use error::NbtError;
pub use types::{Compound, List, Long, RootTag, Tag, TagType};
