//! UTF-8 decoding for NBT strings.

use crate::error::NbtError;

/// Decodes `bytes` as UTF-8.
pub fn decode(bytes: &[u8]) -> Result<String, NbtError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| NbtError::Malformed(format!("invalid UTF-8 string: {e}")))
}
