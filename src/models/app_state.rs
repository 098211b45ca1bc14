use crate::models::config::CompareSettings;
use crate::models::{ComparisonConfig, ImageSlot, SlotId};
use crate::services::metric::CompressionMetric;

/// A recoverable load error waiting to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadNotice {
    pub slot: SlotId,
    pub filename: String,
    pub message: String,
}

impl LoadNotice {
    /// One-line text for a transient notice.
    pub fn summary(&self) -> String {
        format!(
            "Could not load {} into the {} slot: {}",
            self.filename, self.slot, self.message
        )
    }
}

/// Single source of truth for the comparison view.
///
/// Wrapped by [`crate::state::StateManager`]; slot content only changes
/// through its `assign` and `set_hover` entry points.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonState {
    pub before: ImageSlot,
    pub after: ImageSlot,
    pub config: ComparisonConfig,
    pub notice: Option<LoadNotice>,
}

impl Default for ComparisonState {
    fn default() -> Self {
        Self::from_settings(&CompareSettings::default())
    }
}

impl ComparisonState {
    /// Initial state with the configured placeholders and selections.
    pub fn from_settings(settings: &CompareSettings) -> Self {
        Self {
            before: ImageSlot::placeholder(
                &settings.placeholder_before.url,
                &settings.placeholder_before.filename,
            ),
            after: ImageSlot::placeholder(
                &settings.placeholder_after.url,
                &settings.placeholder_after.filename,
            ),
            config: ComparisonConfig {
                variant: settings.default_variant,
                direction: settings.default_direction,
            },
            notice: None,
        }
    }

    pub fn slot(&self, id: SlotId) -> &ImageSlot {
        match id {
            SlotId::Before => &self.before,
            SlotId::After => &self.after,
        }
    }

    pub(crate) fn slot_mut(&mut self, id: SlotId) -> &mut ImageSlot {
        match id {
            SlotId::Before => &mut self.before,
            SlotId::After => &mut self.after,
        }
    }

    /// Derived on every call; never cached.
    pub fn compression_metric(&self) -> Option<CompressionMetric> {
        CompressionMetric::from_sizes(self.before.size_kb(), self.after.size_kb())
    }
}
