//! Display helper functions for sections and components

use shared::{PlacedComponent, Section};

/// First 8 characters of an id
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Get display name for a section
pub fn section_display_name(section: &Section) -> String {
    format!("{} ({})", section.name, short_id(&section.id))
}

/// Get display name for a component, e.g. `Cola x3 (1a2b3c4d)`
pub fn component_display_name(component: &PlacedComponent) -> String {
    if component.facings > 1 {
        format!("{} x{} ({})", component.name, component.facings, short_id(&component.id))
    } else {
        format!("{} ({})", component.name, short_id(&component.id))
    }
}
