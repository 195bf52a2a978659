//! Raw component mutations.
//!
//! `add_component` and `move_component` do not validate; callers go through
//! the snap-and-validate path in `placement_ops`.

use shared::{ComponentId, PlacedComponent};

use super::SceneState;
use crate::validation::PlacementError;

impl SceneState {
    /// Append a component to a section, keeping every previously placed item
    pub(crate) fn add_component(
        &mut self,
        section_id: &str,
        component: PlacedComponent,
    ) -> Result<(), PlacementError> {
        self.require_section_mut(section_id)?.components.push(component);
        self.version += 1;
        Ok(())
    }

    /// Update only position and row of one component
    pub(crate) fn move_component(
        &mut self,
        section_id: &str,
        component_id: &str,
        x: f64,
        y: f64,
        row_index: usize,
    ) -> Result<(), PlacementError> {
        let component = self
            .require_section_mut(section_id)?
            .component_mut(component_id)
            .ok_or_else(|| PlacementError::UnknownComponent(component_id.to_string()))?;
        component.x = x;
        component.y = y;
        component.row_index = row_index;
        self.version += 1;
        Ok(())
    }

    /// Remove a single placed component. Removal cannot break layout
    /// invariants, so no checks apply.
    pub fn remove_component(
        &mut self,
        section_id: &str,
        component_id: &str,
    ) -> Result<PlacedComponent, PlacementError> {
        let index = self
            .require_section(section_id)?
            .components
            .iter()
            .position(|c| c.id == component_id)
            .ok_or_else(|| PlacementError::UnknownComponent(component_id.to_string()))?;

        self.begin_edit();
        let removed = self.require_section_mut(section_id)?.components.remove(index);
        self.version += 1;
        tracing::info!("Removed component {} from section {}", component_id, section_id);
        Ok(removed)
    }

    /// Ids of all components in a section, in insertion order
    pub fn component_ids(&self, section_id: &str) -> Vec<ComponentId> {
        self.section(section_id)
            .map(|s| s.components.iter().map(|c| c.id.clone()).collect())
            .unwrap_or_default()
    }
}
