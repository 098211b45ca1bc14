//! Services module - pure logic behind the comparison view.
//!
//! Nothing here knows about drop zones or the widget; the
//! [`ComparisonController`](crate::ui::ComparisonController) wires these together.
//!
//! # Components
//!
//! - [`IngestionResolver`]: decides which dropped or picked file goes into which slot,
//!   including the two-file "raw" heuristic
//! - [`ImageLoader`]: reads a file and checks it decodes, producing an inline image
//! - [`CompressionMetric`]: the after/before size ratio and its classification
//! - [`labels`]: caption strings for the two slots
//!
//! # Usage Example
//!
//! ```ignore
//! use imgcompare::services::{ImageLoader, IngestionResolver, filter_images};
//!
//! let resolver = IngestionResolver::new("raw")?;
//! for placement in resolver.resolve(filter_images(files), Some(SlotId::Before)) {
//!     let loaded = ImageLoader::default().load(&placement.file).await?;
//!     state.assign(placement.slot, loaded.into_assignment());
//! }
//! ```

pub mod ingestion;
pub mod labels;
pub mod loader;
pub mod metric;

pub use ingestion::{
    FileSource, ImageFile, IngestError, IngestionResolver, Placement, content_type_for,
    filter_images,
};
pub use loader::{ImageLoader, LoadError, LoadedImage};
pub use metric::{CompressionMetric, SizeChange};
