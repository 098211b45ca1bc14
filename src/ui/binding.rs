// Presentation binding - the configuration surface of the external comparison widget
//
// The widget is a stateless renderer: everything it shows is derived here from a
// state snapshot, and nothing is ever read back from it.

use crate::models::{ComparisonState, Direction, ImageSource, SlotId, Variant};
use crate::services::labels;
use indexmap::IndexMap;
use serde::Serialize;

/// Names of the widget's content slots, in the order the widget declares them.
pub const WIDGET_SLOTS: [&str; 4] = ["label-before", "label-after", "image-before", "image-after"];

/// Declarative configuration for the comparison widget
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct WidgetConfig {
    pub variant: Variant,
    pub direction: Direction,
    pub label_before: String,
    pub label_after: String,
    pub image_before: ImageSource,
    pub image_after: ImageSource,
}

impl WidgetConfig {
    pub fn from_state(state: &ComparisonState) -> Self {
        let (label_before, label_after) = labels::labels(state);
        Self {
            variant: state.config.variant,
            direction: state.config.direction,
            label_before,
            label_after,
            image_before: state.before.image().clone(),
            image_after: state.after.image().clone(),
        }
    }

    /// Element attributes: `variant` and `direction`.
    pub fn attributes(&self) -> IndexMap<&'static str, &'static str> {
        IndexMap::from([
            ("variant", self.variant.as_str()),
            ("direction", self.direction.as_str()),
        ])
    }

    /// Content for each named widget slot, keyed by [`WIDGET_SLOTS`].
    pub fn slot_contents(&self) -> IndexMap<&'static str, String> {
        IndexMap::from([
            (WIDGET_SLOTS[0], self.label_before.clone()),
            (WIDGET_SLOTS[1], self.label_after.clone()),
            (WIDGET_SLOTS[2], self.image_before.to_src()),
            (WIDGET_SLOTS[3], self.image_after.to_src()),
        ])
    }
}

/// Everything a host needs to draw one frame of the comparison view
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub widget: WidgetConfig,
    pub hover_before: bool,
    pub hover_after: bool,
    /// Transient load error text, if one is pending
    pub notice: Option<String>,
}

impl ViewModel {
    pub fn from_state(state: &ComparisonState) -> Self {
        Self {
            widget: WidgetConfig::from_state(state),
            hover_before: state.before.hovering(),
            hover_after: state.after.hovering(),
            notice: state.notice.as_ref().map(|n| n.summary()),
        }
    }

    pub fn hovering(&self, zone: SlotId) -> bool {
        match zone {
            SlotId::Before => self.hover_before,
            SlotId::After => self.hover_after,
        }
    }
}

/// What the host must do with the platform event after the controller handled it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventResponse {
    /// Suppress the platform default (opening or navigating to the file)
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl EventResponse {
    /// Fully consumed by the drop zone
    pub const CONSUMED: EventResponse = EventResponse {
        prevent_default: true,
        stop_propagation: true,
    };
}
