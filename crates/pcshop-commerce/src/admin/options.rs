//! Static option lists for the product editor's selects.

use crate::catalog::Category;

pub const LAPTOP_BRANDS: &[&str] = &["Dell", "HP", "Lenovo", "ASUS", "Acer", "MSI", "Apple", "Gigabyte"];

pub const MONITOR_BRANDS: &[&str] = &["LG", "Samsung", "ViewSonic", "AOC", "BenQ", "Philips", "Xiaomi"];

pub const PARTS_BRANDS: &[&str] = &[
    "Intel",
    "AMD",
    "NVIDIA",
    "Kingston",
    "Corsair",
    "G.Skill",
    "Western Digital",
    "Seagate",
    "Cooler Master",
    "NZXT",
    "Seasonic",
    "Deepcool",
    "ASRock",
];

pub const LAPTOP_USAGES: &[&str] = &["Gaming", "Office", "Graphics Design", "Student", "Business"];

/// Brand choices offered for a category.
pub fn brand_options(category: Category) -> &'static [&'static str] {
    match category {
        Category::Laptop => LAPTOP_BRANDS,
        Category::Monitor => MONITOR_BRANDS,
        Category::Parts => PARTS_BRANDS,
    }
}

/// Usage choices; only laptops carry a usage tag.
pub fn usage_options(category: Category) -> &'static [&'static str] {
    match category {
        Category::Laptop => LAPTOP_USAGES,
        Category::Monitor | Category::Parts => &[],
    }
}
