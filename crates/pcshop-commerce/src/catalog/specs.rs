//! Specification schema registry.
//!
//! Each (category, part kind) pair owns an ordered list of technical fields the
//! storefront shows on the product page and the admin editor renders as inputs.
//! The registry is static data; lookups never fail; unknown combinations yield
//! an empty field list.

use serde::Serialize;

use crate::catalog::{Category, PartKind};

/// One technical attribute in a specification schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldDescriptor {
    /// Key in the product's `specs` map; unique within its schema.
    pub name: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Example value shown in empty inputs.
    pub placeholder: &'static str,
}

const fn field(name: &'static str, label: &'static str, placeholder: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        name,
        label,
        placeholder,
    }
}

const LAPTOP_FIELDS: &[FieldDescriptor] = &[
    field("cpuType", "Processor", "Intel Core i5-12450H"),
    field("ram", "Memory", "16GB DDR4 3200MHz"),
    field("storage", "Storage", "512GB NVMe SSD"),
    field("gpu", "Graphics", "NVIDIA RTX 4050 6GB"),
    field("screenSize", "Screen size", "15.6 inch"),
    field("screenResolution", "Resolution", "1920x1080 144Hz"),
    field("os", "Operating system", "Windows 11 Home"),
    field("weight", "Weight", "2.1 kg"),
    field("battery", "Battery", "4-cell 60Wh"),
];

const MONITOR_FIELDS: &[FieldDescriptor] = &[
    field("screenSize", "Screen size", "27 inch"),
    field("resolution", "Resolution", "2560x1440"),
    field("panelType", "Panel type", "IPS"),
    field("refreshRate", "Refresh rate", "165Hz"),
    field("responseTime", "Response time", "1ms"),
    field("ports", "Ports", "HDMI 2.0, DisplayPort 1.4"),
];

const CPU_FIELDS: &[FieldDescriptor] = &[
    field("socket", "Socket", "LGA1700"),
    field("cores", "Cores", "6"),
    field("threads", "Threads", "12"),
    field("baseClock", "Base clock", "2.5GHz"),
    field("boostClock", "Boost clock", "4.6GHz"),
    field("tdp", "TDP", "65W"),
];

const MAINBOARD_FIELDS: &[FieldDescriptor] = &[
    field("socket", "Socket", "AM5"),
    field("chipset", "Chipset", "B650"),
    field("formFactor", "Form factor", "Micro-ATX"),
    field("memorySlots", "Memory slots", "4"),
    field("memoryType", "Memory type", "DDR5"),
];

const RAM_FIELDS: &[FieldDescriptor] = &[
    field("capacity", "Capacity", "16GB (2x8GB)"),
    field("type", "Type", "DDR5"),
    field("speed", "Speed", "5600MHz"),
    field("latency", "Latency", "CL36"),
];

const STORAGE_FIELDS: &[FieldDescriptor] = &[
    field("capacity", "Capacity", "1TB"),
    field("type", "Type", "NVMe SSD"),
    field("interface", "Interface", "PCIe 4.0 x4"),
    field("readSpeed", "Read speed", "7000MB/s"),
    field("writeSpeed", "Write speed", "5000MB/s"),
];

const GPU_FIELDS: &[FieldDescriptor] = &[
    field("chipset", "Chipset", "GeForce RTX 4060"),
    field("vram", "VRAM", "8GB"),
    field("memoryType", "Memory type", "GDDR6"),
    field("boostClock", "Boost clock", "2460MHz"),
    field("tdp", "TDP", "115W"),
];

const PSU_FIELDS: &[FieldDescriptor] = &[
    field("wattage", "Wattage", "650W"),
    field("efficiency", "Efficiency", "80 Plus Gold"),
    field("modular", "Modular", "Full modular"),
];

const COOLING_FIELDS: &[FieldDescriptor] = &[
    field("type", "Type", "AIO liquid 240mm"),
    field("fanSize", "Fan size", "120mm"),
    field("socketSupport", "Socket support", "LGA1700, AM5"),
];

const CASE_FIELDS: &[FieldDescriptor] = &[
    field("formFactor", "Form factor", "Mid tower ATX"),
    field("color", "Color", "Black"),
    field("material", "Material", "Steel, tempered glass"),
    field("fanSupport", "Fan support", "Up to 7x 120mm"),
];

/// A specification schema, one per (category, part kind) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpecSchema {
    Laptop,
    Monitor,
    Part(PartKind),
}

impl SpecSchema {
    /// Resolve the schema for a category; parts need a part kind.
    pub fn resolve(category: Category, part: Option<PartKind>) -> Option<SpecSchema> {
        match category {
            Category::Laptop => Some(SpecSchema::Laptop),
            Category::Monitor => Some(SpecSchema::Monitor),
            Category::Parts => part.map(SpecSchema::Part),
        }
    }

    /// Ordered field list of this schema.
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        match self {
            SpecSchema::Laptop => LAPTOP_FIELDS,
            SpecSchema::Monitor => MONITOR_FIELDS,
            SpecSchema::Part(kind) => match kind {
                PartKind::Cpu => CPU_FIELDS,
                PartKind::Mainboard => MAINBOARD_FIELDS,
                PartKind::Ram => RAM_FIELDS,
                PartKind::Storage => STORAGE_FIELDS,
                PartKind::Gpu => GPU_FIELDS,
                PartKind::Psu => PSU_FIELDS,
                PartKind::Cooling => COOLING_FIELDS,
                PartKind::Case => CASE_FIELDS,
            },
        }
    }

    /// Registry key, e.g. `laptop` or `partsram`.
    pub fn key(&self) -> String {
        match self {
            SpecSchema::Laptop => "laptop".to_string(),
            SpecSchema::Monitor => "monitor".to_string(),
            SpecSchema::Part(kind) => format!("parts{}", kind.as_str()),
        }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields().iter().find(|f| f.name == name)
    }
}

/// Typed lookup: fields for a category and optional part kind.
pub fn specs_fields(category: Category, part: Option<PartKind>) -> &'static [FieldDescriptor] {
    SpecSchema::resolve(category, part)
        .map(|schema| schema.fields())
        .unwrap_or(&[])
}

/// String-keyed lookup over raw category and sub-category values.
///
/// For `parts` the key is `"parts"` followed by the sub-category; a missing or
/// unknown sub-category gives an empty list. The sub-category is ignored for
/// laptops and monitors. Unknown categories give an empty list.
pub fn get_specs_fields(category: &str, sub_category: Option<&str>) -> &'static [FieldDescriptor] {
    let key = match category.trim().to_lowercase().as_str() {
        "parts" => format!("parts{}", sub_category.unwrap_or("").trim().to_lowercase()),
        other => other.to_string(),
    };
    schema_for_key(&key).map(|s| s.fields()).unwrap_or(&[])
}

fn schema_for_key(key: &str) -> Option<SpecSchema> {
    match key {
        "laptop" => Some(SpecSchema::Laptop),
        "monitor" => Some(SpecSchema::Monitor),
        other => other
            .strip_prefix("parts")
            .and_then(PartKind::from_str)
            .map(SpecSchema::Part),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn names(fields: &[FieldDescriptor]) -> Vec<&'static str> {
        fields.iter().map(|f| f.name).collect()
    }

    #[test]
    fn test_parts_ram_fields() {
        let fields = names(get_specs_fields("parts", Some("ram")));
        assert!(fields.contains(&"capacity"));
        assert!(fields.contains(&"type"));
        assert!(fields.contains(&"speed"));
        assert!(!fields.contains(&"screenSize"));
    }

    #[test]
    fn test_sub_category_ignored_for_laptop_and_monitor() {
        assert_eq!(get_specs_fields("laptop", Some("ram")), get_specs_fields("laptop", None));
        assert_eq!(get_specs_fields("monitor", Some("cpu")), MONITOR_FIELDS);
    }

    #[test]
    fn test_unknown_inputs_yield_empty() {
        assert!(get_specs_fields("parts", None).is_empty());
        assert!(get_specs_fields("parts", Some("toaster")).is_empty());
        assert!(get_specs_fields("furniture", None).is_empty());
        assert!(get_specs_fields("", Some("cpu")).is_empty());
    }

    #[test]
    fn test_typed_lookup_matches_string_lookup() {
        for kind in PartKind::ALL {
            assert_eq!(
                specs_fields(Category::Parts, Some(kind)),
                get_specs_fields("parts", Some(kind.as_str()))
            );
        }
        assert!(specs_fields(Category::Parts, None).is_empty());
    }

    #[test]
    fn test_field_names_unique_within_each_schema() {
        let mut schemas = vec![SpecSchema::Laptop, SpecSchema::Monitor];
        schemas.extend(PartKind::ALL.iter().map(|k| SpecSchema::Part(*k)));

        for schema in schemas {
            let fields = schema.fields();
            let unique: HashSet<_> = fields.iter().map(|f| f.name).collect();
            assert_eq!(unique.len(), fields.len(), "duplicate field in {}", schema.key());
            assert!(!fields.is_empty());
        }
    }

    #[test]
    fn test_schema_key() {
        assert_eq!(SpecSchema::Part(PartKind::Gpu).key(), "partsgpu");
        assert_eq!(SpecSchema::Laptop.key(), "laptop");
        assert_eq!(SpecSchema::Laptop.field("cpuType").map(|f| f.label), Some("Processor"));
    }
}
