//! Root codec: gzip sniffing and top-level encode/decode.

use std::sync::Arc;

use bytes::Bytes;

use crate::codec::{self, Reader, reader::DEFAULT_MAX_DEPTH};
use crate::compress::{CompressionProvider, has_gzip_header};
use crate::error::NbtError;
use crate::types::RootTag;

/// Reads and writes NBT archives, gzip-wrapped or not.
///
/// Decoding sniffs the gzip magic number and routes compressed input
/// through the configured [`CompressionProvider`]; uncompressed input is
/// decoded immediately, without awaiting anything.
///
/// ```
/// # async fn demo() -> Result<(), nbtr::NbtError> {
/// use nbtr::compress::Identity;
/// use nbtr::{Compound, NbtCodec, RootTag};
///
/// let codec = NbtCodec::new().provider(Identity).max_depth(64);
/// let bytes = codec.write(&RootTag::new("Level", Compound::new())).await?;
/// let root = codec.parse(bytes).await?;
/// assert_eq!(root.name, "Level");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct NbtCodec {
    provider: Option<Arc<dyn CompressionProvider>>,
    compress: bool,
    max_depth: usize,
}

impl NbtCodec {
    /// Creates a codec with the default provider (gzip when the `gzip`
    /// feature is enabled, none otherwise) and compressed output disabled.
    pub fn new() -> Self {
        Self {
            provider: default_provider(),
            compress: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the compression provider.
    pub fn provider(mut self, provider: impl CompressionProvider) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Removes the compression provider; gzip input will then be rejected.
    pub fn without_provider(mut self) -> Self {
        self.provider = None;
        self
    }

    /// Sets whether [`write`](Self::write) gzips its output.
    pub fn compress(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    /// Sets the maximum list/compound nesting depth accepted when decoding.
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    fn require_provider(&self) -> Result<&Arc<dyn CompressionProvider>, NbtError> {
        self.provider
            .as_ref()
            .ok_or_else(|| NbtError::Compression("no compression provider configured".into()))
    }

    /// Decodes an archive, decompressing it first if it starts with the
    /// gzip magic number.
    ///
    /// A decompression failure is returned as-is; the still-compressed bytes
    /// are never decoded.
    pub async fn parse(&self, data: impl Into<Bytes>) -> Result<RootTag, NbtError> {
        let data = data.into();
        if !has_gzip_header(&data) {
            return self.parse_uncompressed(&data);
        }

        let provider = self.require_provider()?;
        tracing::debug!(len = data.len(), "gzip header found, decompressing NBT");
        let raw = provider.gunzip(data).await.inspect_err(|e| {
            tracing::warn!(error = %e, "NBT decompression failed");
        })?;
        self.parse_uncompressed(&raw)
    }

    /// Decodes an uncompressed archive.
    pub fn parse_uncompressed(&self, data: &[u8]) -> Result<RootTag, NbtError> {
        let root = Reader::new(data)
            .max_depth(self.max_depth)
            .root()
            .map_err(NbtError::into_malformed)
            .inspect_err(|e| tracing::warn!(error = %e, len = data.len(), "NBT decode failed"))?;
        tracing::debug!(name = %root.name, entries = root.value.len(), "decoded NBT root");
        Ok(root)
    }

    /// Encodes an archive, gzipping it when compression is enabled.
    pub async fn write(&self, root: &RootTag) -> Result<Bytes, NbtError> {
        let raw = self.write_uncompressed(root)?;
        if !self.compress {
            return Ok(raw);
        }

        let provider = self.require_provider()?;
        tracing::debug!(len = raw.len(), "compressing NBT");
        provider.gzip(raw).await.inspect_err(|e| {
            tracing::warn!(error = %e, "NBT compression failed");
        })
    }

    /// Encodes an archive without compression.
    pub fn write_uncompressed(&self, root: &RootTag) -> Result<Bytes, NbtError> {
        let bytes = codec::write_uncompressed(root)?;
        tracing::debug!(name = %root.name, len = bytes.len(), "encoded NBT root");
        Ok(bytes)
    }
}

impl Default for NbtCodec {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "gzip")]
fn default_provider() -> Option<Arc<dyn CompressionProvider>> {
    Some(Arc::new(crate::compress::Gzip::new()))
}

#[cfg(not(feature = "gzip"))]
fn default_provider() -> Option<Arc<dyn CompressionProvider>> {
    None
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::compress::{GZIP_MAGIC, Identity};
    use crate::types::{Compound, List, Tag};

    /// Counts calls and fails or strips the magic number on demand.
    #[derive(Default)]
    struct Recording {
        gzips: Arc<AtomicUsize>,
        gunzips: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl CompressionProvider for Recording {
        async fn gzip(&self, data: Bytes) -> Result<Bytes, NbtError> {
            self.gzips.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(NbtError::compression("gzip refused"));
            }
            let mut out = GZIP_MAGIC.to_vec();
            out.extend_from_slice(&data);
            Ok(Bytes::from(out))
        }

        async fn gunzip(&self, data: Bytes) -> Result<Bytes, NbtError> {
            self.gunzips.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(NbtError::compression("gunzip refused"));
            }
            Ok(data.slice(GZIP_MAGIC.len()..))
        }
    }

    fn sample() -> RootTag {
        let mut value = Compound::new();
        value.insert("aa", Tag::Byte(1));
        value.insert("bb", List::Byte(vec![1, 2, 3]));
        RootTag::new("root", value)
    }

    #[tokio::test]
    async fn uncompressed_input_skips_provider() {
        let gunzips = Arc::new(AtomicUsize::new(0));
        let codec = NbtCodec::new().provider(Recording {
            gunzips: gunzips.clone(),
            ..Default::default()
        });
        let bytes = codec.write(&sample()).await.unwrap();
        assert_eq!(bytes[0], 10);
        assert_eq!(codec.parse(bytes).await.unwrap(), sample());
        assert_eq!(gunzips.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn gzip_header_routes_to_provider() {
        let gzips = Arc::new(AtomicUsize::new(0));
        let gunzips = Arc::new(AtomicUsize::new(0));
        let codec = NbtCodec::new().compress(true).provider(Recording {
            gzips: gzips.clone(),
            gunzips: gunzips.clone(),
            fail: false,
        });

        let bytes = codec.write(&sample()).await.unwrap();
        assert!(has_gzip_header(&bytes));
        assert_eq!(codec.parse(bytes).await.unwrap(), sample());
        assert_eq!(gzips.load(Ordering::SeqCst), 1);
        assert_eq!(gunzips.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gzip_header_routes_to_provider_even_if_invalid() {
        let gunzips = Arc::new(AtomicUsize::new(0));
        let codec = NbtCodec::new().provider(Recording {
            gunzips: gunzips.clone(),
            fail: true,
            ..Default::default()
        });
        let err = codec
            .parse(Bytes::from_static(&[0x1F, 0x8B, 0xFF]))
            .await
            .unwrap_err();
        assert!(matches!(err, NbtError::Compression(_)));
        assert_eq!(gunzips.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn compression_failure_is_surfaced() {
        let codec = NbtCodec::new().compress(true).provider(Recording {
            fail: true,
            ..Default::default()
        });
        let err = codec.write(&sample()).await.unwrap_err();
        assert!(matches!(err, NbtError::Compression(_)));
    }

    #[tokio::test]
    async fn missing_provider_rejects_gzip_input() {
        let codec = NbtCodec::new().without_provider();
        let err = codec.parse(vec![0x1F, 0x8B, 0x08]).await.unwrap_err();
        assert!(matches!(err, NbtError::Compression(_)));

        // Uncompressed input still works without a provider.
        let bytes = codec.write(&sample()).await.unwrap();
        assert_eq!(codec.parse(bytes).await.unwrap(), sample());
    }

    #[tokio::test]
    async fn identity_provider_with_compression_enabled() {
        let codec = NbtCodec::new().provider(Identity).compress(true);
        let bytes = codec.write(&sample()).await.unwrap();
        assert_eq!(codec.parse(bytes).await.unwrap(), sample());
    }

    #[tokio::test]
    async fn malformed_input_reports_error() {
        let codec = NbtCodec::new();
        let err = codec.parse(vec![1, 0, 0]).await.unwrap_err();
        assert!(matches!(err, NbtError::Malformed(_)));
    }

    #[test]
    fn depth_limit_is_configurable() {
        let mut inner = Compound::new();
        inner.insert("x", 1i8);
        let mut value = Compound::new();
        value.insert("inner", inner);
        let root = RootTag::new("", value);

        let codec = NbtCodec::new().max_depth(1);
        let bytes = codec.write_uncompressed(&root).unwrap();
        assert!(matches!(
            codec.parse_uncompressed(&bytes),
            Err(NbtError::Malformed(_))
        ));
        assert_eq!(NbtCodec::new().parse_uncompressed(&bytes).unwrap(), root);
    }

    #[cfg(feature = "gzip")]
    #[tokio::test]
    async fn default_codec_round_trips_real_gzip() {
        let codec = NbtCodec::new().compress(true);
        let bytes = codec.write(&sample()).await.unwrap();
        assert!(has_gzip_header(&bytes));
        assert_eq!(codec.parse(bytes).await.unwrap(), sample());
    }

    #[cfg(feature = "gzip")]
    #[tokio::test]
    async fn corrupt_gzip_is_not_decoded() {
        let codec = NbtCodec::new();
        let err = codec
            .parse(vec![0x1F, 0x8B, 0x0A, 0x00, 0x00, 0x00])
            .await
            .unwrap_err();
        assert!(matches!(err, NbtError::Compression(_)));
    }
}
