use base64::Engine;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// One of the two comparison positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotId {
    Before,
    After,
}

impl SlotId {
    /// Both slots, in display order.
    pub const ALL: [SlotId; 2] = [SlotId::Before, SlotId::After];

    pub fn as_str(self) -> &'static str {
        match self {
            SlotId::Before => "before",
            SlotId::After => "after",
        }
    }

    /// The slot on the other side of the comparison.
    pub fn other(self) -> SlotId {
        match self {
            SlotId::Before => SlotId::After,
            SlotId::After => SlotId::Before,
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image held fully in memory, ready to hand to the widget.
#[derive(Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub media_type: String,
    pub bytes: Arc<[u8]>,
    /// Pixel dimensions, when the header was decoded.
    pub dimensions: Option<(u32, u32)>,
}

impl InlineImage {
    /// Encode as a `data:` URL, the form a browser-style widget consumes.
    pub fn to_data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.media_type, encoded)
    }
}

// Payloads can be megabytes; keep Debug output readable.
impl fmt::Debug for InlineImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineImage")
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

/// Displayable image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Remote or placeholder content, passed to the widget untouched.
    Url(String),
    /// Contents of a user-supplied file.
    Inline(InlineImage),
}

impl ImageSource {
    /// The `src` value for the widget's image slot.
    pub fn to_src(&self) -> String {
        match self {
            ImageSource::Url(url) => url.clone(),
            ImageSource::Inline(image) => image.to_data_url(),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, ImageSource::Inline(_))
    }
}

impl Serialize for ImageSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_src())
    }
}

/// The full content triple written into a slot.
///
/// There is deliberately no way to update one field of a slot on its own: a
/// new image always arrives with its size and name.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotAssignment {
    pub image: ImageSource,
    pub size_kb: f64,
    pub filename: String,
}

/// One comparison position and its display metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSlot {
    image: ImageSource,
    size_kb: f64,
    filename: String,
    hovering: bool,
}

impl ImageSlot {
    /// A slot showing placeholder content of unknown size.
    pub fn placeholder(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            image: ImageSource::Url(url.into()),
            size_kb: 0.0,
            filename: filename.into(),
            hovering: false,
        }
    }

    pub fn image(&self) -> &ImageSource {
        &self.image
    }

    /// Size in KB of the displayed image; `0.0` until a user file is loaded.
    pub fn size_kb(&self) -> f64 {
        self.size_kb
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn hovering(&self) -> bool {
        self.hovering
    }

    /// Whether the slot holds a user-supplied file of known size.
    pub fn has_known_size(&self) -> bool {
        self.size_kb > 0.0
    }

    pub(crate) fn replace(&mut self, assignment: SlotAssignment) {
        let SlotAssignment {
            image,
            size_kb,
            filename,
        } = assignment;
        self.image = image;
        self.size_kb = size_kb;
        self.filename = filename;
    }

    pub(crate) fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }
}
