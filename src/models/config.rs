use crate::models::{Direction, Variant};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BEFORE_URL: &str = "https://picsum.photos/id/40/800/600";
pub const DEFAULT_AFTER_URL: &str = "https://picsum.photos/id/40/800/600?grayscale";
pub const DEFAULT_BEFORE_FILENAME: &str = "original.jpg";
pub const DEFAULT_AFTER_FILENAME: &str = "compressed.jpg";

/// User configuration from `Compare Settings.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(rename = "Compare_Settings", default)]
    pub compare_settings: CompareSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareSettings {
    #[serde(rename = "Default Variant", default)]
    pub default_variant: Variant,

    #[serde(rename = "Default Direction", default)]
    pub default_direction: Direction,

    /// Filename marker that sends a file to the before slot on a two-file drop.
    #[serde(rename = "Raw Marker", default = "default_raw_marker")]
    pub raw_marker: String,

    #[serde(rename = "Verify Decode", default = "default_true")]
    pub verify_decode: bool,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    #[serde(rename = "Log Directory", default = "default_log_dir")]
    pub log_dir: String,

    #[serde(rename = "Placeholder Before", default = "default_placeholder_before")]
    pub placeholder_before: Placeholder,

    #[serde(rename = "Placeholder After", default = "default_placeholder_after")]
    pub placeholder_after: Placeholder,
}

/// Demo content shown in a slot before any file is supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    #[serde(rename = "Url")]
    pub url: String,

    #[serde(rename = "Filename")]
    pub filename: String,
}

impl Default for CompareSettings {
    fn default() -> Self {
        Self {
            default_variant: Variant::default(),
            default_direction: Direction::default(),
            raw_marker: default_raw_marker(),
            verify_decode: true,
            debug_mode: false,
            log_dir: default_log_dir(),
            placeholder_before: default_placeholder_before(),
            placeholder_after: default_placeholder_after(),
        }
    }
}

fn default_raw_marker() -> String {
    "raw".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_placeholder_before() -> Placeholder {
    Placeholder {
        url: DEFAULT_BEFORE_URL.to_string(),
        filename: DEFAULT_BEFORE_FILENAME.to_string(),
    }
}

fn default_placeholder_after() -> Placeholder {
    Placeholder {
        url: DEFAULT_AFTER_URL.to_string(),
        filename: DEFAULT_AFTER_FILENAME.to_string(),
    }
}
