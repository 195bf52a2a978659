//! Per-shelf capacity report (inches)

use serde::{Deserialize, Serialize};

use super::SceneState;
use crate::geometry::ItemFootprint;
use crate::units::to_inches;
use crate::validation::PlacementError;

/// Used vs available width on one shelf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelfCapacity {
    pub row_index: usize,
    pub used_width: f64,
    pub available_width: f64,
    pub component_count: usize,
}

impl ShelfCapacity {
    pub fn remaining_width(&self) -> f64 {
        (self.available_width - self.used_width).max(0.0)
    }

    /// Fraction of the shelf in use, 0.0 for a zero-width section
    pub fn fill_ratio(&self) -> f64 {
        if self.available_width <= 0.0 {
            0.0
        } else {
            self.used_width / self.available_width
        }
    }
}

impl SceneState {
    /// Capacity of every shelf in a section, keyed by each component's cached row.
    /// Widths are measured from the occupied rectangles and reported in inches.
    pub fn shelf_capacity(&self, section_id: &str) -> Result<Vec<ShelfCapacity>, PlacementError> {
        let section = self.require_section(section_id)?;
        let mut shelves: Vec<ShelfCapacity> = (0..section.rows.len())
            .map(|row_index| ShelfCapacity {
                row_index,
                used_width: 0.0,
                available_width: section.width,
                component_count: 0,
            })
            .collect();

        for component in &section.components {
            if let Some(shelf) = shelves.get_mut(component.row_index) {
                shelf.used_width += to_inches(ItemFootprint::of_component(component).width_px());
                shelf.component_count += 1;
            }
        }
        Ok(shelves)
    }
}
