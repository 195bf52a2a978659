use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use planogram_lib::command::{execute_command, AgentCommand, CommandResponse};
use planogram_lib::state::ShelfCapacity;
use serde_json::{json, Value};
use shared::PlanogramScene;

use crate::AppState;

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Execute one command against the shared session
pub async fn command(
    State(state): State<AppState>,
    Json(cmd): Json<AgentCommand>,
) -> Json<CommandResponse> {
    let mut session = state.session.lock().await;
    let response = execute_command(&mut session, cmd);
    if let Some(err) = &response.error {
        tracing::debug!("Command failed: {err}");
    }
    Json(response)
}

/// Execute a batch in order; the lock is held for the whole batch
pub async fn commands(
    State(state): State<AppState>,
    Json(cmds): Json<Vec<AgentCommand>>,
) -> Json<Vec<CommandResponse>> {
    let mut session = state.session.lock().await;
    let responses: Vec<CommandResponse> = cmds
        .into_iter()
        .map(|cmd| execute_command(&mut session, cmd))
        .collect();
    tracing::info!("Executed batch of {} commands", responses.len());
    Json(responses)
}

/// Current scene document
pub async fn scene(State(state): State<AppState>) -> Json<PlanogramScene> {
    let session = state.session.lock().await;
    Json(session.scene.scene.clone())
}

/// Shelf usage of one section
pub async fn capacity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ShelfCapacity>>, (StatusCode, Json<Value>)> {
    let session = state.session.lock().await;
    session
        .shelf_capacity(&id)
        .map(Json)
        .map_err(|e| (StatusCode::NOT_FOUND, Json(json!({ "error": e.to_string() }))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use planogram_lib::fixtures::demo_catalog;
    use planogram_lib::session::Session;

    fn state() -> AppState {
        AppState::new(Session::new(demo_catalog()))
    }

    fn parse(json: &str) -> AgentCommand {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_command_then_scene() {
        let state = state();
        let Json(resp) = command(
            State(state.clone()),
            Json(parse(r#"{"command": "add_fixture", "template_id": "single-shelf"}"#)),
        )
        .await;
        assert!(resp.success);

        let Json(doc) = scene(State(state)).await;
        assert_eq!(doc.fixtures.len(), 1);
        assert_eq!(doc.sections.len(), 1);
    }

    #[tokio::test]
    async fn test_batch_and_capacity() {
        let state = state();
        let Json(resp) = command(
            State(state.clone()),
            Json(parse(r#"{"command": "add_fixture", "template_id": "single-shelf"}"#)),
        )
        .await;
        let sid = resp.data.unwrap()["sections"][0].as_str().unwrap().to_string();

        let place = |x: f64| {
            parse(
                &json!({
                    "command": "place_product",
                    "section_id": sid,
                    "product_id": "water-1l",
                    "x": x,
                    "y": 10.0,
                })
                .to_string(),
            )
        };
        let Json(responses) = commands(State(state.clone()), Json(vec![place(0.0), place(0.0)])).await;
        assert!(responses[0].success);
        assert!(!responses[1].success);

        let Json(shelves) = capacity(State(state.clone()), Path(sid)).await.unwrap();
        assert_eq!(shelves[0].used_width, 3.5);
        assert_eq!(shelves[0].component_count, 1);
    }

    #[tokio::test]
    async fn test_capacity_unknown_section() {
        let err = capacity(State(state()), Path("ghost".to_string())).await.unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }
}
