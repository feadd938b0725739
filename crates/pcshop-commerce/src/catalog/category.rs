//! Category and part-kind classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored category values that all mean "PC parts".
///
/// `linh kien` is the legacy Vietnamese value some records still carry.
pub const PARTS_ALIASES: [&str; 3] = ["accessory", "parts", "linh kien"];

/// Top-level product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Laptop,
    Monitor,
    Parts,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 3] = [Category::Laptop, Category::Monitor, Category::Parts];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Laptop => "laptop",
            Category::Monitor => "monitor",
            Category::Parts => "parts",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Laptop => "Laptops",
            Category::Monitor => "Monitors",
            Category::Parts => "PC Parts",
        }
    }

    /// Parse a stored or UI category value.
    ///
    /// Matching is exact after trimming and lowercasing; every parts alias maps
    /// to [`Category::Parts`].
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "laptop" => Some(Category::Laptop),
            "monitor" => Some(Category::Monitor),
            other if PARTS_ALIASES.contains(&other) => Some(Category::Parts),
            _ => None,
        }
    }

    /// Check whether a raw stored category value belongs to this category.
    pub fn matches_stored(&self, stored: &str) -> bool {
        Category::from_str(stored) == Some(*self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-category of a PC part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    Cpu,
    Mainboard,
    Ram,
    Storage,
    Gpu,
    Psu,
    Cooling,
    Case,
}

impl PartKind {
    pub const ALL: [PartKind; 8] = [
        PartKind::Cpu,
        PartKind::Mainboard,
        PartKind::Ram,
        PartKind::Storage,
        PartKind::Gpu,
        PartKind::Psu,
        PartKind::Cooling,
        PartKind::Case,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartKind::Cpu => "cpu",
            PartKind::Mainboard => "mainboard",
            PartKind::Ram => "ram",
            PartKind::Storage => "storage",
            PartKind::Gpu => "gpu",
            PartKind::Psu => "psu",
            PartKind::Cooling => "cooling",
            PartKind::Case => "case",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PartKind::Cpu => "Processor",
            PartKind::Mainboard => "Mainboard",
            PartKind::Ram => "Memory",
            PartKind::Storage => "Storage",
            PartKind::Gpu => "Graphics Card",
            PartKind::Psu => "Power Supply",
            PartKind::Cooling => "Cooling",
            PartKind::Case => "Case",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cpu" => Some(PartKind::Cpu),
            "mainboard" => Some(PartKind::Mainboard),
            "ram" => Some(PartKind::Ram),
            "storage" => Some(PartKind::Storage),
            "gpu" => Some(PartKind::Gpu),
            "psu" => Some(PartKind::Psu),
            "cooling" => Some(PartKind::Cooling),
            "case" => Some(PartKind::Case),
            _ => None,
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
