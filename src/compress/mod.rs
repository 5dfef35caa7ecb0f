//! The gzip provider seam used by [`NbtCodec`](crate::archive::NbtCodec).
//!
//! The codec never links a compression library directly; it calls an
//! injected [`CompressionProvider`]. The `gzip` feature supplies a
//! `flate2`-backed implementation.

#[cfg(feature = "gzip")]
mod gzip;

#[cfg(feature = "gzip")]
pub use gzip::Gzip;

use bytes::Bytes;

use crate::error::NbtError;

/// The two-byte magic number that starts every gzip stream.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Returns `true` if `data` starts with the gzip magic number.
pub fn has_gzip_header(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}

/// Compresses and decompresses whole gzip streams.
///
/// Implementations may complete immediately or suspend; the codec awaits
/// either way and never blocks the calling thread itself.
#[async_trait::async_trait]
pub trait CompressionProvider: Send + Sync + 'static {
    /// Wraps `data` in a gzip stream.
    async fn gzip(&self, data: Bytes) -> Result<Bytes, NbtError>;

    /// Unwraps the gzip stream in `data`.
    async fn gunzip(&self, data: Bytes) -> Result<Bytes, NbtError>;
}

/// A provider that returns its input unchanged in both directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

#[async_trait::async_trait]
impl CompressionProvider for Identity {
    async fn gzip(&self, data: Bytes) -> Result<Bytes, NbtError> {
        Ok(data)
    }

    async fn gunzip(&self, data: Bytes) -> Result<Bytes, NbtError> {
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_gzip_magic() {
        assert!(has_gzip_header(&[0x1F, 0x8B]));
        assert!(has_gzip_header(&[0x1F, 0x8B, 0x08, 0x00]));
        assert!(!has_gzip_header(&[0x1F]));
        assert!(!has_gzip_header(&[0x8B, 0x1F]));
        assert!(!has_gzip_header(&[0x0A, 0x00, 0x00]));
        assert!(!has_gzip_header(&[]));
    }

    #[tokio::test]
    async fn identity_passes_through() {
        let data = Bytes::from_static(&[1, 2, 3]);
        assert_eq!(Identity.gzip(data.clone()).await.unwrap(), data);
        assert_eq!(Identity.gunzip(data.clone()).await.unwrap(), data);
    }
}
