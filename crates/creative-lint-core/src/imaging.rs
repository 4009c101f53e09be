//! Loading image sources for pixel sampling.
//!
//! Sources are either `data:` URIs (base64 or percent-encoded) or local file
//! paths. Decoding is CPU-bound, so the async entry point runs it on the
//! blocking pool under a deadline.

use std::path::PathBuf;
use std::time::Duration;

use base64::Engine;
use image::DynamicImage;
use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Errors raised while loading an image source.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    /// The data URI could not be parsed.
    #[error("invalid data URI: {0}")]
    DataUri(String),

    /// Base64 payload could not be decoded.
    #[error("failed to decode base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Remote sources are not fetched by the engine.
    #[error("remote image sources are not supported: {0}")]
    Remote(String),

    /// IO error reading a file source.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Bytes are not a decodable image.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Loading exceeded its time budget.
    #[error("image loading timed out after {0:?}")]
    Timeout(Duration),

    /// The blocking task panicked or was cancelled.
    #[error("image loading task failed: {0}")]
    Task(String),
}

/// Decodes an image from raw bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image format.
pub fn load_from_bytes(bytes: &[u8]) -> Result<DynamicImage, ImageLoadError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Decodes an image from a `data:` URI.
///
/// # Errors
///
/// Returns an error if the URI is malformed or its payload is not an image.
pub fn load_from_data_uri(uri: &str) -> Result<DynamicImage, ImageLoadError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| ImageLoadError::DataUri("missing data: prefix".to_string()))?;
    let (metadata, payload) = rest
        .split_once(',')
        .ok_or_else(|| ImageLoadError::DataUri("missing comma".to_string()))?;

    let bytes: Vec<u8> = if metadata.contains(";base64") {
        base64::engine::general_purpose::STANDARD.decode(payload.trim())?
    } else {
        percent_decode_str(payload).collect()
    };
    load_from_bytes(&bytes)
}

/// Loads an image from a data URI or a file path.
///
/// # Errors
///
/// Returns an error for remote URLs, unreadable files and undecodable data.
pub fn load_source(src: &str) -> Result<DynamicImage, ImageLoadError> {
    if src.starts_with("data:") {
        return load_from_data_uri(src);
    }
    if src.starts_with("http://") || src.starts_with("https://") {
        return Err(ImageLoadError::Remote(src.to_string()));
    }
    let path = PathBuf::from(src);
    let bytes = std::fs::read(&path).map_err(|source| ImageLoadError::Io { path, source })?;
    load_from_bytes(&bytes)
}

/// Loads an image on the blocking pool, giving up after `budget`.
///
/// # Errors
///
/// Returns [`ImageLoadError::Timeout`] when the deadline passes, or the
/// underlying load error.
pub async fn load_with_timeout(
    src: &str,
    budget: Duration,
) -> Result<DynamicImage, ImageLoadError> {
    let owned = src.to_string();
    let task = tokio::task::spawn_blocking(move || load_source(&owned));
    match tokio::time::timeout(budget, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join)) => Err(ImageLoadError::Task(join.to_string())),
        Err(_) => Err(ImageLoadError::Timeout(budget)),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Cursor;

    use base64::Engine;
    use image::{ImageFormat, Rgba, RgbaImage};

    /// Encodes an image as a PNG data URI.
    pub fn data_uri(img: &RgbaImage) -> String {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(bytes)
        )
    }

    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{data_uri, solid};
    use super::*;

    #[test]
    fn decodes_base64_data_uri() {
        let uri = data_uri(&solid(4, 3, [10, 20, 30, 255]));
        let img = load_from_data_uri(&uri).unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
    }

    #[test]
    fn decodes_percent_encoded_data_uri() {
        use percent_encoding::{percent_encode, NON_ALPHANUMERIC};
        use std::io::Cursor;

        let mut png = Vec::new();
        solid(2, 5, [200, 0, 0, 255])
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let uri = format!("data:image/png,{}", percent_encode(&png, NON_ALPHANUMERIC));

        let img = load_from_data_uri(&uri).unwrap();
        assert_eq!((img.width(), img.height()), (2, 5));
    }

    #[test]
    fn rejects_malformed_uri() {
        assert!(matches!(
            load_from_data_uri("data:image/png;base64"),
            Err(ImageLoadError::DataUri(_))
        ));
        assert!(matches!(
            load_from_data_uri("data:image/png;base64,!!!"),
            Err(ImageLoadError::Base64(_))
        ));
    }

    #[test]
    fn remote_sources_are_refused() {
        assert!(matches!(
            load_source("https://cdn.example.com/a.png"),
            Err(ImageLoadError::Remote(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");
        assert!(matches!(
            load_source(path.to_str().unwrap()),
            Err(ImageLoadError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn async_load_returns_image() {
        let uri = data_uri(&solid(2, 2, [255, 255, 255, 255]));
        let img = load_with_timeout(&uri, Duration::from_secs(5)).await.unwrap();
        assert_eq!(img.width(), 2);
    }
}
