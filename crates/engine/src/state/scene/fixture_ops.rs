//! Structural operations: fixture instances, section names, edges

use shared::{FixtureId, FixtureInstance, FixtureTemplate, SceneEdge, Section};

use super::SceneState;
use crate::validation::PlacementError;

impl SceneState {
    /// Copy a fixture template into the scene. Every section gets a fresh id.
    pub fn add_fixture_instance(&mut self, template: &FixtureTemplate, position: [f64; 2]) -> FixtureId {
        self.begin_edit();

        let fixture_id = uuid::Uuid::new_v4().to_string();
        let mut section_ids = Vec::with_capacity(template.sections.len());
        for section_template in &template.sections {
            let section_id = uuid::Uuid::new_v4().to_string();
            self.scene.sections.push(Section::from_template(
                section_id.clone(),
                fixture_id.clone(),
                section_template,
            ));
            section_ids.push(section_id);
        }

        self.scene.fixtures.push(FixtureInstance {
            id: fixture_id.clone(),
            template_id: template.id.clone(),
            name: template.name.clone(),
            position,
            sections: section_ids,
        });

        self.version += 1;
        tracing::info!(
            "Added fixture '{}' ({} sections) as {}",
            template.name,
            template.sections.len(),
            fixture_id
        );
        fixture_id
    }

    /// Rename a section
    pub fn rename_section(&mut self, section_id: &str, name: String) -> Result<(), PlacementError> {
        self.require_section(section_id)?;
        self.begin_edit();
        self.require_section_mut(section_id)?.name = name;
        self.version += 1;
        Ok(())
    }

    /// Connect two fixture nodes with an edge
    pub fn connect_fixtures(&mut self, source: &str, target: &str) -> Result<String, PlacementError> {
        for id in [source, target] {
            if self.scene.fixture(id).is_none() {
                return Err(PlacementError::UnknownFixture(id.to_string()));
            }
        }

        if source == target {
            return Err(PlacementError::SelfConnection(source.to_string()));
        }

        let edge_id = format!("e-{}-{}", source, target);
        if self.scene.edges.iter().any(|e| e.id == edge_id) {
            return Ok(edge_id);
        }

        self.begin_edit();
        self.scene.edges.push(SceneEdge {
            id: edge_id.clone(),
            source: source.to_string(),
            target: target.to_string(),
        });
        self.version += 1;
        Ok(edge_id)
    }

    /// Sections of a fixture instance in template order
    pub fn fixture_sections(&self, fixture_id: &str) -> Vec<&Section> {
        self.scene
            .fixture(fixture_id)
            .map(|f| f.sections.iter().filter_map(|id| self.scene.section(id)).collect())
            .unwrap_or_default()
    }
}
