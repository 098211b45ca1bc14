use crate::models::{ImageSource, InlineImage, SlotAssignment};
use crate::services::ingestion::{FileSource, ImageFile};
use image::{ImageError, ImageFormat, ImageReader};
use std::io::Cursor;
use std::sync::Arc;
use thiserror::Error;

/// Errors turning a file into displayable slot content
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is empty")]
    Empty(String),

    #[error("{name} is not a decodable image: {reason}")]
    Decode { name: String, reason: String },
}

/// A file read and checked, ready to be assigned to a slot.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub filename: String,
    pub image: InlineImage,
    pub byte_len: usize,
}

impl LoadedImage {
    /// Size in KB of exactly the bytes that will be displayed.
    pub fn size_kb(&self) -> f64 {
        self.byte_len as f64 / 1024.0
    }

    pub fn into_assignment(self) -> SlotAssignment {
        SlotAssignment {
            size_kb: self.size_kb(),
            filename: self.filename,
            image: ImageSource::Inline(self.image),
        }
    }
}

/// Reads user-supplied files into inline images.
///
/// Stateless apart from the `verify_decode` switch, so one loader can serve
/// any number of concurrent loads.
#[derive(Debug, Clone)]
pub struct ImageLoader {
    verify_decode: bool,
}

impl ImageLoader {
    pub fn new(verify_decode: bool) -> Self {
        Self { verify_decode }
    }

    /// Read the whole file and produce its displayable form.
    ///
    /// With decode verification on, the format is sniffed from the bytes and
    /// the header must yield dimensions; otherwise the declared content type is
    /// trusted as-is.
    pub async fn load(&self, file: &ImageFile) -> Result<LoadedImage, LoadError> {
        let bytes: Arc<[u8]> = match file.source() {
            FileSource::Memory(bytes) => Arc::clone(bytes),
            FileSource::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|source| LoadError::Io {
                    name: file.name().to_string(),
                    source,
                })?
                .into(),
        };

        if bytes.is_empty() {
            return Err(LoadError::Empty(file.name().to_string()));
        }

        let (media_type, dimensions) = if self.verify_decode {
            probe(file, &bytes)?
        } else {
            (file.content_type().to_string(), None)
        };

        tracing::debug!(
            "Loaded {} ({} bytes, {}, {:?})",
            file.name(),
            bytes.len(),
            media_type,
            dimensions
        );

        Ok(LoadedImage {
            filename: file.name().to_string(),
            byte_len: bytes.len(),
            image: InlineImage {
                media_type,
                bytes,
                dimensions,
            },
        })
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Sniff the format and read the header dimensions.
///
/// Formats the `image` crate cannot decode are passed through without
/// dimensions: AVIF recognised from its header, or a declared type such as
/// SVG that the crate has no format for. Bytes that claim a decodable format
/// and fail to parse are rejected.
fn probe(file: &ImageFile, bytes: &[u8]) -> Result<(String, Option<(u32, u32)>), LoadError> {
    let decode_error = |reason: String| LoadError::Decode {
        name: file.name().to_string(),
        reason,
    };

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| decode_error(e.to_string()))?;

    let Some(format) = reader.format() else {
        if ImageFormat::from_mime_type(file.content_type()).is_none() {
            return Ok((file.content_type().to_string(), None));
        }
        return Err(decode_error("unrecognised image format".to_string()));
    };
    let media_type = format.to_mime_type().to_string();

    match reader.into_dimensions() {
        Ok(dimensions) => Ok((media_type, Some(dimensions))),
        Err(ImageError::Unsupported(e)) => {
            tracing::debug!("No decoder for {} ({}): {}", file.name(), media_type, e);
            Ok((media_type, None))
        }
        Err(e) => Err(decode_error(e.to_string())),
    }
}
