use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Presentation style of the comparison widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Slider,
    Overlay,
    Split,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Slider => "slider",
            Variant::Overlay => "overlay",
            Variant::Split => "split",
        }
    }
}

/// Reading direction of the comparison widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised variant or direction name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseSelectionError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl FromStr for Variant {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slider" => Ok(Variant::Slider),
            "overlay" => Ok(Variant::Overlay),
            "split" => Ok(Variant::Split),
            _ => Err(ParseSelectionError {
                kind: "variant",
                value: s.to_string(),
                expected: "slider, overlay, split",
            }),
        }
    }
}

impl FromStr for Direction {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr" => Ok(Direction::Ltr),
            "rtl" => Ok(Direction::Rtl),
            _ => Err(ParseSelectionError {
                kind: "direction",
                value: s.to_string(),
                expected: "ltr, rtl",
            }),
        }
    }
}

/// Free-standing widget selections, independent of slot content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComparisonConfig {
    pub variant: Variant,
    pub direction: Direction,
}
