//! `flate2`-backed gzip provider.

use std::io::{Read, Write};

use bytes::Bytes;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use super::CompressionProvider;
use crate::error::NbtError;

/// Gzip provider running (de)compression on tokio's blocking pool.
///
/// Outside a tokio runtime the work runs inline on the polling thread.
#[derive(Debug, Clone, Copy)]
pub struct Gzip {
    level: Compression,
}

impl Gzip {
    pub fn new() -> Self {
        Self {
            level: Compression::default(),
        }
    }

    /// Sets the compression level (0 = store, 9 = best).
    pub fn level(mut self, level: u32) -> Self {
        self.level = Compression::new(level.min(9));
        self
    }
}

impl Default for Gzip {
    fn default() -> Self {
        Self::new()
    }
}

fn compress(data: &[u8], level: Compression) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), level);
    encoder.write_all(data)?;
    encoder.finish()
}

fn decompress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len() * 4);
    GzDecoder::new(data).read_to_end(&mut out)?;
    Ok(out)
}

async fn run_blocking<F>(work: F) -> Result<Bytes, NbtError>
where
    F: FnOnce() -> std::io::Result<Vec<u8>> + Send + 'static,
{
    let out = match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle
            .spawn_blocking(work)
            .await
            .map_err(NbtError::compression)?,
        Err(_) => work(),
    };
    out.map(Bytes::from).map_err(NbtError::compression)
}

#[async_trait::async_trait]
impl CompressionProvider for Gzip {
    async fn gzip(&self, data: Bytes) -> Result<Bytes, NbtError> {
        let level = self.level;
        run_blocking(move || compress(&data, level)).await
    }

    async fn gunzip(&self, data: Bytes) -> Result<Bytes, NbtError> {
        run_blocking(move || decompress(&data)).await
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    use super::*;
    use crate::compress::has_gzip_header;

    /// Polls `fut` to completion on the current thread, with no runtime.
    fn block_on<F: Future>(fut: F) -> F::Output {
        let mut fut = pin!(fut);
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
                return out;
            }
            std::thread::yield_now();
        }
    }

    #[tokio::test]
    async fn gzip_round_trip() {
        let data = Bytes::from(b"hello hello hello hello".repeat(8));
        let packed = Gzip::new().gzip(data.clone()).await.unwrap();
        assert!(has_gzip_header(&packed));
        assert!(packed.len() < data.len());
        assert_eq!(Gzip::new().gunzip(packed).await.unwrap(), data);
    }

    #[tokio::test]
    async fn store_level_still_produces_gzip() {
        let data = Bytes::from_static(b"abc");
        let packed = Gzip::new().level(0).gzip(data.clone()).await.unwrap();
        assert!(has_gzip_header(&packed));
        assert_eq!(Gzip::new().gunzip(packed).await.unwrap(), data);
    }

    #[tokio::test]
    async fn corrupt_stream_is_a_compression_error() {
        let data = Bytes::from_static(&[0x1F, 0x8B, 0x08, 0x00, 0xFF]);
        let err = Gzip::new().gunzip(data).await.unwrap_err();
        assert!(matches!(err, NbtError::Compression(_)));
    }

    #[test]
    fn works_without_a_runtime() {
        let data = Bytes::from_static(b"no runtime here");
        let packed = block_on(Gzip::new().gzip(data.clone())).unwrap();
        assert!(has_gzip_header(&packed));
        assert_eq!(block_on(Gzip::new().gunzip(packed)).unwrap(), data);

        let corrupt = Bytes::from_static(&[0x1F, 0x8B, 0x08, 0x00, 0xFF]);
        let err = block_on(Gzip::new().gunzip(corrupt)).unwrap_err();
        assert!(matches!(err, NbtError::Compression(_)));
    }
}
