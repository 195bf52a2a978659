//! JSON command protocol over a `Session`.
//!
//! Positions in `place_product` / `move_component` are content-relative
//! pixels; positions inside `pointer` events are section-local (header included).

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::interaction::{InteractionOutcome, PointerEvent};
use crate::session::Session;
use crate::state::scene::{component_display_name, section_display_name};
use crate::validation::PlacementError;

fn default_facings() -> u32 {
    1
}

/// A command a client can execute against a session.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Instantiate a fixture template from the catalog
    AddFixture {
        template_id: String,
        #[serde(default)]
        position: [f64; 2],
    },
    RenameSection {
        section_id: String,
        name: String,
    },
    ConnectFixtures {
        source: String,
        target: String,
    },
    /// Snap, validate and place a catalog product
    PlaceProduct {
        section_id: String,
        product_id: String,
        #[serde(default = "default_facings")]
        facings: u32,
        x: f64,
        y: f64,
    },
    /// Snap, validate and move a placed component
    MoveComponent {
        section_id: String,
        component_id: String,
        x: f64,
        y: f64,
    },
    RemoveComponent {
        section_id: String,
        component_id: String,
    },
    /// Feed one pointer/drag event to the interaction controller
    Pointer {
        event: PointerEvent,
    },
    /// Used vs available width per shelf, in inches
    ShelfCapacity {
        section_id: String,
    },
    Undo,
    Redo,
    /// Clear the entire canvas
    Clear,
    /// List fixtures, sections and components
    Inspect,
    ExportScene,
    ImportScene {
        scene_json: String,
    },
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }

    fn rejected(e: &PlacementError) -> Self {
        Self {
            success: false,
            error: Some(e.to_string()),
            data: Some(json!({ "rejected": e.is_rejection() })),
        }
    }
}

/// JSON view of an interaction outcome. `accepted` is false for rejections
/// and ignored frames.
pub fn outcome_json(outcome: &InteractionOutcome) -> serde_json::Value {
    match outcome {
        InteractionOutcome::Ignored => json!({ "outcome": "ignored", "accepted": false }),
        InteractionOutcome::DragStarted => json!({ "outcome": "drag_started", "accepted": true }),
        InteractionOutcome::Preview(Ok(pos)) => {
            json!({ "outcome": "preview", "accepted": true, "position": pos })
        }
        InteractionOutcome::Preview(Err(e)) => {
            json!({ "outcome": "preview", "accepted": false, "reason": e.to_string() })
        }
        InteractionOutcome::Placed(p) => json!({
            "outcome": "placed",
            "accepted": true,
            "component_id": p.component_id,
            "position": p.position,
        }),
        InteractionOutcome::Rejected(e) => {
            json!({ "outcome": "rejected", "accepted": false, "reason": e.to_string() })
        }
        InteractionOutcome::Grabbed { component_id } => {
            json!({ "outcome": "grabbed", "accepted": true, "component_id": component_id })
        }
        InteractionOutcome::Moved(pos) => {
            json!({ "outcome": "moved", "accepted": true, "position": pos })
        }
        InteractionOutcome::Pending(pos) => {
            json!({ "outcome": "pending", "accepted": true, "position": pos })
        }
        InteractionOutcome::FrameIgnored(e) => {
            json!({ "outcome": "frame_ignored", "accepted": false, "reason": e.to_string() })
        }
        InteractionOutcome::Released { committed } => {
            json!({ "outcome": "released", "accepted": true, "committed": committed })
        }
        InteractionOutcome::Cancelled => json!({ "outcome": "cancelled", "accepted": true }),
    }
}

fn inspect(session: &Session) -> serde_json::Value {
    let scene = &session.scene.scene;
    let fixtures: Vec<serde_json::Value> = scene
        .fixtures
        .iter()
        .map(|fixture| {
            let sections: Vec<serde_json::Value> = fixture
                .sections
                .iter()
                .filter_map(|id| scene.section(id))
                .map(|section| {
                    let components: Vec<serde_json::Value> = section
                        .components
                        .iter()
                        .map(|c| {
                            json!({
                                "id": c.id,
                                "label": component_display_name(c),
                                "effective_width": c.effective_width(),
                                "x": c.x,
                                "y": c.y,
                                "row_index": c.row_index,
                            })
                        })
                        .collect();
                    json!({
                        "id": section.id,
                        "label": section_display_name(section),
                        "rows": section.rows.len(),
                        "components": components,
                    })
                })
                .collect();
            json!({
                "id": fixture.id,
                "name": fixture.name,
                "template_id": fixture.template_id,
                "sections": sections,
            })
        })
        .collect();

    json!({
        "version": session.scene.version(),
        "fixture_count": fixtures.len(),
        "component_count": session.component_count(),
        "fixtures": fixtures,
        "edges": scene.edges,
    })
}

/// Execute a single command on the session.
pub fn execute_command(session: &mut Session, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::AddFixture {
            template_id,
            position,
        } => match session.add_fixture(&template_id, position) {
            Ok(id) => {
                let sections = session.section_ids(&id);
                CommandResponse::ok_with_data(json!({ "id": id, "sections": sections }))
            }
            Err(e) => CommandResponse::rejected(&e),
        },

        AgentCommand::RenameSection { section_id, name } => {
            match session.scene.rename_section(&section_id, name) {
                Ok(()) => CommandResponse::ok(),
                Err(e) => CommandResponse::rejected(&e),
            }
        }

        AgentCommand::ConnectFixtures { source, target } => {
            match session.scene.connect_fixtures(&source, &target) {
                Ok(edge_id) => CommandResponse::ok_with_data(json!({ "edge_id": edge_id })),
                Err(e) => CommandResponse::rejected(&e),
            }
        }

        AgentCommand::PlaceProduct {
            section_id,
            product_id,
            facings,
            x,
            y,
        } => match session.place_product(&section_id, &product_id, facings, x, y) {
            Ok(p) => CommandResponse::ok_with_data(json!({
                "id": p.component_id,
                "position": p.position,
            })),
            Err(e) => CommandResponse::rejected(&e),
        },

        AgentCommand::MoveComponent {
            section_id,
            component_id,
            x,
            y,
        } => match session.move_component(&section_id, &component_id, x, y) {
            Ok(pos) => CommandResponse::ok_with_data(json!({ "position": pos })),
            Err(e) => CommandResponse::rejected(&e),
        },

        AgentCommand::RemoveComponent {
            section_id,
            component_id,
        } => match session.remove_component(&section_id, &component_id) {
            Ok(()) => CommandResponse::ok_with_data(json!({ "removed": component_id })),
            Err(e) => CommandResponse::rejected(&e),
        },

        AgentCommand::Pointer { event } => {
            let outcome = session.dispatch(event);
            CommandResponse::ok_with_data(outcome_json(&outcome))
        }

        AgentCommand::ShelfCapacity { section_id } => match session.shelf_capacity(&section_id) {
            Ok(shelves) => CommandResponse::ok_with_data(json!({ "shelves": shelves })),
            Err(e) => CommandResponse::rejected(&e),
        },

        AgentCommand::Undo => {
            let success = session.undo();
            CommandResponse::ok_with_data(json!({ "undone": success }))
        }

        AgentCommand::Redo => {
            let success = session.redo();
            CommandResponse::ok_with_data(json!({ "redone": success }))
        }

        AgentCommand::Clear => {
            session.clear();
            CommandResponse::ok()
        }

        AgentCommand::Inspect => CommandResponse::ok_with_data(inspect(session)),

        AgentCommand::ExportScene => match session.export_scene_json() {
            Ok(json) => CommandResponse::ok_with_data(json!({ "scene_json": json })),
            Err(e) => CommandResponse::err(e),
        },

        AgentCommand::ImportScene { scene_json } => match session.load_scene_json(&scene_json) {
            Ok(()) => CommandResponse::ok(),
            Err(e) => CommandResponse::err(e),
        },
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(session: &mut Session, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(session, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(session: &mut Session, json: &str) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(session, cmd))
        .collect())
}
