//! Error types for NBT encoding and decoding.

use std::fmt;

/// Errors that can occur while reading, writing or (de)compressing NBT data.
#[derive(Debug, thiserror::Error)]
pub enum NbtError {
    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("unknown tag type: 0x{0:02X}")]
    UnknownTagType(u8),

    #[error("need {needed} bytes at offset {offset} but only {remaining} remaining")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("invalid tag: {0}")]
    InvalidTag(String),

    #[error("compression error: {0}")]
    Compression(String),
}

impl NbtError {
    /// Wraps any displayable error as a compression failure.
    pub fn compression(e: impl fmt::Display) -> Self {
        Self::Compression(e.to_string())
    }

    /// Returns `true` for every error caused by corrupt or truncated input.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::Malformed(_) | Self::UnknownTagType(_) | Self::OutOfBounds { .. }
        )
    }

    /// Folds bounds and dispatch errors into `Malformed`, leaving others intact.
    pub fn into_malformed(self) -> Self {
        match self {
            Self::UnknownTagType(_) | Self::OutOfBounds { .. } => {
                Self::Malformed(self.to_string())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_errors_fold_into_malformed() {
        let err = NbtError::OutOfBounds {
            offset: 3,
            needed: 4,
            remaining: 1,
        }
        .into_malformed();
        match err {
            NbtError::Malformed(msg) => assert!(msg.contains("offset 3"), "{msg}"),
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn unknown_type_is_malformed() {
        assert!(NbtError::UnknownTagType(0x2A).is_malformed());
        assert_eq!(
            NbtError::UnknownTagType(0x2A).to_string(),
            "unknown tag type: 0x2A"
        );
    }

    #[test]
    fn compression_is_not_malformed() {
        let err = NbtError::compression("corrupt deflate stream");
        assert!(!err.is_malformed());
        assert!(matches!(err.into_malformed(), NbtError::Compression(_)));
    }
}
