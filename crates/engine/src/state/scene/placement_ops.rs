//! Validated placement and move: snap, check, then commit or reject as a whole

use kurbo::Point;
use serde::{Deserialize, Serialize};
use shared::{ComponentId, PlacedComponent, ProductTemplate};

use super::SceneState;
use crate::geometry::ItemFootprint;
use crate::snap::{snap_position, SnappedPosition};
use crate::state::settings::SnapSettings;
use crate::validation::{validate_placement, PlacementError};

/// A committed placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub component_id: ComponentId,
    pub position: SnappedPosition,
}

impl SceneState {
    /// Snap `raw` and validate the result against a section, without committing.
    /// `exclude_id` names the item being moved, if any.
    pub fn preview_placement(
        &self,
        section_id: &str,
        footprint: &ItemFootprint,
        raw: Point,
        snap: &SnapSettings,
        exclude_id: Option<&str>,
    ) -> Result<SnappedPosition, PlacementError> {
        if footprint.facings == 0 {
            return Err(PlacementError::InvalidFacings);
        }
        let section = self.require_section(section_id)?;
        let position = snap_position(raw, footprint, section, snap, exclude_id)
            .ok_or(PlacementError::NoShelves)?;
        validate_placement(position.x, position.y, footprint, section, exclude_id)?;
        Ok(position)
    }

    /// Place a new product. On rejection the scene is left untouched.
    pub fn place_product(
        &mut self,
        section_id: &str,
        product: &ProductTemplate,
        facings: u32,
        raw: Point,
        snap: &SnapSettings,
    ) -> Result<Placement, PlacementError> {
        let footprint = ItemFootprint::of_product(product, facings);
        let position = self.preview_placement(section_id, &footprint, raw, snap, None)?;

        let component_id = uuid::Uuid::new_v4().to_string();
        self.begin_edit();
        self.add_component(
            section_id,
            PlacedComponent {
                id: component_id.clone(),
                product_id: product.id.clone(),
                name: product.name.clone(),
                width: product.width,
                height: product.height,
                depth: product.depth,
                facings,
                x: position.x,
                y: position.y,
                row_index: position.row_index,
            },
        )?;

        tracing::info!(
            "Placed '{}' x{} at ({}, {}) on shelf {} of section {}",
            product.name,
            facings,
            position.x,
            position.y,
            position.row_index,
            section_id
        );
        Ok(Placement {
            component_id,
            position,
        })
    }

    /// Snap and validate a move of an existing component, without committing
    pub fn preview_move(
        &self,
        section_id: &str,
        component_id: &str,
        raw: Point,
        snap: &SnapSettings,
    ) -> Result<SnappedPosition, PlacementError> {
        let component = self
            .require_section(section_id)?
            .component(component_id)
            .ok_or_else(|| PlacementError::UnknownComponent(component_id.to_string()))?;
        let footprint = ItemFootprint::of_component(component);
        self.preview_placement(section_id, &footprint, raw, snap, Some(component_id))
    }

    /// Move an existing component. `record_undo` is false for the follow-up
    /// frames of a drag that already recorded its snapshot.
    pub fn move_placed(
        &mut self,
        section_id: &str,
        component_id: &str,
        raw: Point,
        snap: &SnapSettings,
        record_undo: bool,
    ) -> Result<SnappedPosition, PlacementError> {
        let position = self.preview_move(section_id, component_id, raw, snap)?;
        if record_undo {
            self.begin_edit();
        }
        self.move_component(section_id, component_id, position.x, position.y, position.row_index)?;
        Ok(position)
    }

    /// Commit an already snapped position after re-validating it
    pub(crate) fn commit_move(
        &mut self,
        section_id: &str,
        component_id: &str,
        position: SnappedPosition,
        record_undo: bool,
    ) -> Result<(), PlacementError> {
        let section = self.require_section(section_id)?;
        let component = section
            .component(component_id)
            .ok_or_else(|| PlacementError::UnknownComponent(component_id.to_string()))?;
        let footprint = ItemFootprint::of_component(component);
        validate_placement(position.x, position.y, &footprint, section, Some(component_id))?;

        if record_undo {
            self.begin_edit();
        }
        self.move_component(section_id, component_id, position.x, position.y, position.row_index)
    }
}
