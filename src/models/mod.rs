//! Data models for the comparison view.
//!
//! - [`ComparisonState`]: both slots, the widget selections and any pending load notice
//! - [`ImageSlot`]: one comparison position; content changes only as a whole [`SlotAssignment`]
//! - [`ComparisonConfig`]: the free-standing [`Variant`] / [`Direction`] selections
//! - [`UserConfig`]: settings loaded from `Compare Settings.yaml`
//!
//! # Architecture Note
//!
//! `ComparisonState` is wrapped in `Arc<RwLock<>>` by
//! [`StateManager`](crate::state::StateManager). Slot fields are private, so the
//! image, size and filename of a slot can never be observed out of step.

pub mod app_state;
pub mod comparison;
pub mod config;
pub mod slot;

pub use app_state::{ComparisonState, LoadNotice};
pub use comparison::{ComparisonConfig, Direction, ParseSelectionError, Variant};
pub use config::{CompareSettings, Placeholder, UserConfig};
pub use slot::{ImageSlot, ImageSource, InlineImage, SlotAssignment, SlotId};
