//! Headless editing session: scene, interaction controller, catalog, settings.
//!
//! This is what a rendering layer drives, and what the command protocol, the
//! replay binary and the HTTP server wrap.

use kurbo::Point;
use shared::{Catalog, FixtureId, PlanogramScene, SectionId};

use crate::interaction::{InteractionController, InteractionOutcome, PointerEvent};
use crate::snap::SnappedPosition;
use crate::state::scene::{Placement, SceneState, ShelfCapacity};
use crate::state::settings::EngineSettings;
use crate::validation::{PlacementError, SceneError};

/// One editing session over a read-only catalog
pub struct Session {
    pub scene: SceneState,
    pub controller: InteractionController,
    pub catalog: Catalog,
    pub settings: EngineSettings,
}

impl Session {
    /// Create an empty session with default settings.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_settings(catalog, EngineSettings::default())
    }

    pub fn with_settings(catalog: Catalog, settings: EngineSettings) -> Self {
        Self {
            scene: SceneState::with_history_limit(settings.history.max_undo),
            controller: InteractionController::new(),
            catalog,
            settings,
        }
    }

    // ── Structure ─────────────────────────────────────────────

    /// Instantiate a fixture template from the catalog
    pub fn add_fixture(&mut self, template_id: &str, position: [f64; 2]) -> Result<FixtureId, PlacementError> {
        let template = self
            .catalog
            .fixture(template_id)
            .ok_or_else(|| PlacementError::UnknownFixture(template_id.to_string()))?;
        Ok(self.scene.add_fixture_instance(template, position))
    }

    /// Section ids of a fixture instance, in order
    pub fn section_ids(&self, fixture_id: &str) -> Vec<SectionId> {
        self.scene
            .scene
            .fixture(fixture_id)
            .map(|f| f.sections.clone())
            .unwrap_or_default()
    }

    // ── Placement (content-relative pixel coordinates) ────────

    /// Place a catalog product with its top-left near `(x, y)`
    pub fn place_product(
        &mut self,
        section_id: &str,
        product_id: &str,
        facings: u32,
        x: f64,
        y: f64,
    ) -> Result<Placement, PlacementError> {
        let product = self
            .catalog
            .product(product_id)
            .ok_or_else(|| PlacementError::UnknownProduct(product_id.to_string()))?;
        self.scene
            .place_product(section_id, product, facings, Point::new(x, y), &self.settings.snap)
    }

    /// Move a placed component with its top-left near `(x, y)`
    pub fn move_component(
        &mut self,
        section_id: &str,
        component_id: &str,
        x: f64,
        y: f64,
    ) -> Result<SnappedPosition, PlacementError> {
        self.scene
            .move_placed(section_id, component_id, Point::new(x, y), &self.settings.snap, true)
    }

    pub fn remove_component(&mut self, section_id: &str, component_id: &str) -> Result<(), PlacementError> {
        self.scene.remove_component(section_id, component_id).map(|_| ())
    }

    pub fn shelf_capacity(&self, section_id: &str) -> Result<Vec<ShelfCapacity>, PlacementError> {
        self.scene.shelf_capacity(section_id)
    }

    /// Feed one pointer or drag event to the interaction controller
    pub fn dispatch(&mut self, event: PointerEvent) -> InteractionOutcome {
        self.controller.handle(&mut self.scene, &self.settings, event)
    }

    // ── History ───────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.reset_interaction();
        self.scene.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.reset_interaction();
        self.scene.redo()
    }

    /// Clear the entire canvas
    pub fn clear(&mut self) {
        self.reset_interaction();
        self.scene.clear();
    }

    // ── Import / export ───────────────────────────────────────

    /// Load a scene (replaces current). Invalid scenes are rejected.
    pub fn load_scene(&mut self, scene: PlanogramScene) -> Result<(), SceneError> {
        self.reset_interaction();
        self.scene.import_scene(scene)
    }

    /// Load a scene from JSON string
    pub fn load_scene_json(&mut self, json: &str) -> Result<(), String> {
        let scene: PlanogramScene =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.load_scene(scene).map_err(|e| format!("Invalid scene: {e}"))
    }

    /// Export the current scene as JSON
    pub fn export_scene_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(&self.scene.scene).map_err(|e| format!("JSON encode error: {e}"))
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn fixture_count(&self) -> usize {
        self.scene.scene.fixtures.len()
    }

    pub fn component_count(&self) -> usize {
        self.scene.scene.component_count()
    }

    fn reset_interaction(&mut self) {
        if !self.controller.is_idle() {
            self.controller = InteractionController::new();
        }
    }
}
