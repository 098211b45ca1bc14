// UI module - presentation binding and event handling
//
// This module contains:
// - WidgetConfig / ViewModel: what the external comparison widget and host UI render
// - ComparisonController: handles drop zone, picker and selection events

pub mod binding;
pub mod controller;

pub use binding::{EventResponse, ViewModel, WIDGET_SLOTS, WidgetConfig};
pub use controller::{ComparisonController, EventOutcome, PendingLoads, ZoneEvent};
