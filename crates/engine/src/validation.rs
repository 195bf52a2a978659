//! Placement validation: bounds and overlap predicates.
//!
//! Every rejection is an expected outcome reported through `PlacementError`,
//! never a panic.

use std::collections::HashSet;

use shared::{PlacedComponent, PlanogramScene, Section};

use crate::geometry::{component_rect, overlaps, ItemFootprint};
use crate::units::to_pixels;

/// Why a placement, move or lookup was refused
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    /// Candidate rectangle leaves the section's content area
    #[error("Product does not fit in this section")]
    OutOfBounds,
    /// Candidate rectangle intersects an existing item
    #[error("Product overlaps with existing items")]
    Overlap,
    /// Section has no shelves to rest items on
    #[error("Section has no shelves")]
    NoShelves,
    #[error("Facings must be at least 1")]
    InvalidFacings,
    #[error("Section '{0}' not found")]
    UnknownSection(String),
    #[error("Component '{0}' not found")]
    UnknownComponent(String),
    #[error("Product '{0}' not found")]
    UnknownProduct(String),
    #[error("Fixture '{0}' not found")]
    UnknownFixture(String),
    #[error("Fixture '{0}' cannot be connected to itself")]
    SelfConnection(String),
}

/// Why an imported scene was refused
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("Duplicate component id '{0}'")]
    DuplicateComponent(String),
    #[error("Component '{0}' must have at least one facing")]
    InvalidFacings(String),
    #[error("Component '{0}' does not fit in section '{1}'")]
    OutOfBounds(String, String),
    #[error("Component '{0}' overlaps with existing items")]
    Overlap(String),
}

impl PlacementError {
    /// True for geometric rejections surfaced to the user; false for lookup
    /// and input errors.
    pub fn is_rejection(&self) -> bool {
        matches!(self, PlacementError::OutOfBounds | PlacementError::Overlap)
    }
}

/// True iff the occupied rectangle lies inside
/// `[0, width] x [0, height - header - row_offset]` (pixels).
pub fn is_within_bounds(x: f64, y: f64, footprint: &ItemFootprint, section: &Section) -> bool {
    let max_x = to_pixels(section.width);
    let max_y = to_pixels(section.content_height());
    x >= 0.0
        && y >= 0.0
        && x + footprint.width_px() <= max_x
        && y + footprint.height_px() <= max_y
}

/// True iff the candidate rectangle overlaps any existing item other than
/// `exclude_id`.
pub fn check_overlap(
    x: f64,
    y: f64,
    footprint: &ItemFootprint,
    existing: &[PlacedComponent],
    exclude_id: Option<&str>,
) -> bool {
    let candidate = footprint.rect_at(x, y);
    existing
        .iter()
        .filter(|c| exclude_id != Some(c.id.as_str()))
        .any(|c| overlaps(&candidate, &component_rect(c)))
}

/// Both predicates must pass. Bounds are checked first.
pub fn validate_placement(
    x: f64,
    y: f64,
    footprint: &ItemFootprint,
    section: &Section,
    exclude_id: Option<&str>,
) -> Result<(), PlacementError> {
    if !is_within_bounds(x, y, footprint, section) {
        return Err(PlacementError::OutOfBounds);
    }
    if check_overlap(x, y, footprint, &section.components, exclude_id) {
        return Err(PlacementError::Overlap);
    }
    Ok(())
}

/// Check every placed component of a scene against the same rules the
/// commit path enforces. Component ids must be unique across the scene.
pub fn validate_scene(scene: &PlanogramScene) -> Result<(), SceneError> {
    let mut seen = HashSet::new();
    for section in &scene.sections {
        for c in &section.components {
            if !seen.insert(c.id.as_str()) {
                return Err(SceneError::DuplicateComponent(c.id.clone()));
            }
            if c.facings == 0 {
                return Err(SceneError::InvalidFacings(c.id.clone()));
            }
            let footprint = ItemFootprint::of_component(c);
            if !is_within_bounds(c.x, c.y, &footprint, section) {
                return Err(SceneError::OutOfBounds(c.id.clone(), section.id.clone()));
            }
            if check_overlap(c.x, c.y, &footprint, &section.components, Some(c.id.as_str())) {
                return Err(SceneError::Overlap(c.id.clone()));
            }
        }
    }
    Ok(())
}
