use crate::models::SlotId;
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::sync::Arc;
use thiserror::Error;

/// Media-type prefix a file must carry to be considered for a slot.
pub const IMAGE_MEDIA_PREFIX: &str = "image/";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Errors building an [`ImageFile`] from a path
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read file metadata for {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a regular file: {0}")]
    NotAFile(Utf8PathBuf),

    #[error("Path has no file name: {0}")]
    NoFileName(Utf8PathBuf),
}

/// Where the contents of a user-supplied file live.
#[derive(Debug, Clone)]
pub enum FileSource {
    Path(Utf8PathBuf),
    Memory(Arc<[u8]>),
}

/// A user-supplied file handle, as delivered by a drop or a picker.
#[derive(Debug, Clone)]
pub struct ImageFile {
    name: String,
    content_type: String,
    size_bytes: u64,
    source: FileSource,
}

impl ImageFile {
    /// A file whose contents are already in memory.
    pub fn from_bytes(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size_bytes: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    /// A handle to a file on disk. Contents are read later by the loader.
    ///
    /// The content type is declared from the extension, the way a browser
    /// labels dropped files.
    pub async fn open(path: impl AsRef<Utf8Path>) -> Result<Self, IngestError> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|source| IngestError::Io {
                path: path.clone(),
                source,
            })?;

        if !metadata.is_file() {
            return Err(IngestError::NotAFile(path));
        }

        let name = path
            .file_name()
            .ok_or_else(|| IngestError::NoFileName(path.clone()))?
            .to_string();

        Ok(Self {
            content_type: content_type_for(&name),
            name,
            size_bytes: metadata.len(),
            source: FileSource::Path(path),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Declared size; the loader measures the bytes it actually reads.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with(IMAGE_MEDIA_PREFIX)
    }
}

/// Media type implied by a file name's extension.
pub fn content_type_for(name: &str) -> String {
    mime_guess::from_path(name)
        .first_raw()
        .unwrap_or(FALLBACK_CONTENT_TYPE)
        .to_string()
}

/// Drop everything that is not declared as an image.
pub fn filter_images(files: impl IntoIterator<Item = ImageFile>) -> Vec<ImageFile> {
    files
        .into_iter()
        .filter(|file| {
            let keep = file.is_image();
            if !keep {
                tracing::debug!(
                    "Discarding non-image file {} ({})",
                    file.name(),
                    file.content_type()
                );
            }
            keep
        })
        .collect()
}

/// A file bound for a slot.
#[derive(Debug, Clone)]
pub struct Placement {
    pub slot: SlotId,
    pub file: ImageFile,
}

/// Decides which files go into which slot.
///
/// # Fields
///
/// - `marker_pattern`: case-insensitive literal match of the raw marker
///   (default `raw`), compiled once at construction
#[derive(Debug, Clone)]
pub struct IngestionResolver {
    marker_pattern: Regex,
}

impl IngestionResolver {
    pub fn new(raw_marker: &str) -> Result<Self, regex::Error> {
        let marker_pattern = Regex::new(&format!("(?i){}", regex::escape(raw_marker)))?;
        Ok(Self { marker_pattern })
    }

    fn is_raw(&self, file: &ImageFile) -> bool {
        self.marker_pattern.is_match(file.name())
    }

    /// Assign candidate image files to slots.
    ///
    /// - one file lands in `target`; with no target it is ignored
    /// - two files: the single raw-marked file goes to before, otherwise drop order
    /// - any other count is ignored
    pub fn resolve(&self, files: Vec<ImageFile>, target: Option<SlotId>) -> Vec<Placement> {
        match <[ImageFile; 2]>::try_from(files) {
            Ok([first, second]) => {
                let (before, after) = match (self.is_raw(&first), self.is_raw(&second)) {
                    (false, true) => (second, first),
                    // Both or neither marked: keep drop order.
                    _ => (first, second),
                };
                vec![
                    Placement {
                        slot: SlotId::Before,
                        file: before,
                    },
                    Placement {
                        slot: SlotId::After,
                        file: after,
                    },
                ]
            }
            Err(mut files) => match (files.len(), target) {
                (1, Some(slot)) => vec![Placement {
                    slot,
                    file: files.remove(0),
                }],
                (count, target) => {
                    tracing::debug!(
                        "Ignoring drop of {} file(s) with target {:?}",
                        count,
                        target
                    );
                    Vec::new()
                }
            },
        }
    }
}
