// imgcompare - Before/after image comparison controller
//
// This is the library crate containing the slot store, ingestion rules and
// the presentation binding. The binary crate (main.rs) drives it from the command line.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{ComparisonState, CompareSettings, SlotId, UserConfig};
pub use state::{StateChange, StateManager};
pub use ui::{ComparisonController, ZoneEvent};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
