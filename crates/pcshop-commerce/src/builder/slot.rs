//! The eight component slots of a custom PC build.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::PartKind;

/// A component slot in the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSlot {
    Cpu,
    Mainboard,
    Ram,
    Hdd,
    Vga,
    Cooling,
    Case,
    Psu,
}

impl BuildSlot {
    /// Slots in the order the builder lists them.
    pub const ALL: [BuildSlot; 8] = [
        BuildSlot::Cpu,
        BuildSlot::Mainboard,
        BuildSlot::Ram,
        BuildSlot::Hdd,
        BuildSlot::Vga,
        BuildSlot::Cooling,
        BuildSlot::Case,
        BuildSlot::Psu,
    ];

    /// Position in [`BuildSlot::ALL`].
    pub fn index(&self) -> usize {
        match self {
            BuildSlot::Cpu => 0,
            BuildSlot::Mainboard => 1,
            BuildSlot::Ram => 2,
            BuildSlot::Hdd => 3,
            BuildSlot::Vga => 4,
            BuildSlot::Cooling => 5,
            BuildSlot::Case => 6,
            BuildSlot::Psu => 7,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            BuildSlot::Cpu => "cpu",
            BuildSlot::Mainboard => "mainboard",
            BuildSlot::Ram => "ram",
            BuildSlot::Hdd => "hdd",
            BuildSlot::Vga => "vga",
            BuildSlot::Cooling => "cooling",
            BuildSlot::Case => "case",
            BuildSlot::Psu => "psu",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BuildSlot::Cpu => "CPU",
            BuildSlot::Mainboard => "Mainboard",
            BuildSlot::Ram => "RAM",
            BuildSlot::Hdd => "Storage",
            BuildSlot::Vga => "GPU",
            BuildSlot::Cooling => "Cooling",
            BuildSlot::Case => "Case",
            BuildSlot::Psu => "PSU",
        }
    }

    /// Sub-category the slot's candidates are fetched with.
    pub fn part_kind(&self) -> PartKind {
        match self {
            BuildSlot::Cpu => PartKind::Cpu,
            BuildSlot::Mainboard => PartKind::Mainboard,
            BuildSlot::Ram => PartKind::Ram,
            BuildSlot::Hdd => PartKind::Storage,
            BuildSlot::Vga => PartKind::Gpu,
            BuildSlot::Cooling => PartKind::Cooling,
            BuildSlot::Case => PartKind::Case,
            BuildSlot::Psu => PartKind::Psu,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_lowercase();
        BuildSlot::ALL.into_iter().find(|slot| slot.id() == id)
    }
}

impl fmt::Display for BuildSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
