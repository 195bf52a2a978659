//! Scene state management
//!
//! The scene is an arena: fixtures, edges and a flat table of sections, each
//! section owning its placed components. Mutations bump a version counter and
//! snapshot the previous scene for undo.

mod capacity;
mod component_ops;
mod display;
mod fixture_ops;
mod placement_ops;

pub use capacity::ShelfCapacity;
pub use display::{component_display_name, section_display_name, short_id};
pub use placement_ops::Placement;

use shared::{PlacedComponent, PlanogramScene, Section};

use crate::validation::{validate_scene, PlacementError, SceneError};

/// Scene state with undo/redo history
pub struct SceneState {
    /// Current scene
    pub scene: PlanogramScene,
    /// Undo stack - previous states
    pub(crate) undo_stack: Vec<PlanogramScene>,
    /// Redo stack - undone states
    pub(crate) redo_stack: Vec<PlanogramScene>,
    /// Monotonically increasing version counter for change detection
    pub(crate) version: u64,
    /// Maximum number of undo snapshots kept
    pub(crate) max_undo: usize,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::with_history_limit(100)
    }
}

impl SceneState {
    pub fn with_history_limit(max_undo: usize) -> Self {
        Self {
            scene: PlanogramScene::default(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            version: 0,
            max_undo,
        }
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.scene.section(section_id)
    }

    /// Section lookup that reports a missing id as an error
    pub fn require_section(&self, section_id: &str) -> Result<&Section, PlacementError> {
        self.scene
            .section(section_id)
            .ok_or_else(|| PlacementError::UnknownSection(section_id.to_string()))
    }

    pub(crate) fn require_section_mut(
        &mut self,
        section_id: &str,
    ) -> Result<&mut Section, PlacementError> {
        self.scene
            .section_mut(section_id)
            .ok_or_else(|| PlacementError::UnknownSection(section_id.to_string()))
    }

    pub fn component(&self, section_id: &str, component_id: &str) -> Option<&PlacedComponent> {
        self.section(section_id)?.component(component_id)
    }

    /// Replace the whole scene after checking every component against the
    /// placement rules. A rejected scene leaves the current one untouched.
    pub fn import_scene(&mut self, scene: PlanogramScene) -> Result<(), SceneError> {
        validate_scene(&scene)?;
        self.set_scene(scene);
        tracing::info!("Imported scene with {} sections", self.scene.sections.len());
        Ok(())
    }

    /// Replace the whole scene without checks. Recorded for undo.
    pub(crate) fn set_scene(&mut self, scene: PlanogramScene) {
        self.save_undo();
        self.redo_stack.clear();
        self.scene = scene;
        self.version += 1;
    }

    /// Clear the whole canvas. Recorded for undo.
    pub fn clear(&mut self) {
        self.save_undo();
        self.redo_stack.clear();
        self.scene = PlanogramScene::default();
        self.version += 1;
        tracing::info!("Scene cleared");
    }

    /// Save current state to undo stack
    pub(crate) fn save_undo(&mut self) {
        if self.max_undo == 0 {
            return;
        }
        self.undo_stack.push(self.scene.clone());
        if self.undo_stack.len() > self.max_undo {
            self.undo_stack.remove(0);
        }
    }

    /// Record an undoable edit: snapshot, drop the redo branch
    pub(crate) fn begin_edit(&mut self) {
        self.save_undo();
        self.redo_stack.clear();
    }

    /// Undo last change. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(std::mem::replace(&mut self.scene, prev));
        self.version += 1;
        true
    }

    /// Redo last undone change. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(std::mem::replace(&mut self.scene, next));
        self.version += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
