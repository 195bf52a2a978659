//! Interaction controller: turns pointer and drag events into placements and moves.
//!
//! The controller owns the drag state explicitly. Which section a gesture
//! targets comes from the event (drops) or from the state captured on
//! pointer-down (moves), never from the scene nodes themselves.
//!
//! Event positions are section-local pixels measured from the section's
//! top-left corner, header included. They are shifted into content space
//! (below header and row offset) before snapping.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use shared::{ComponentId, ProductTemplate, Section, SectionId};

use crate::geometry::ItemFootprint;
use crate::snap::SnappedPosition;
use crate::state::scene::{Placement, SceneState};
use crate::state::settings::{CommitMode, EngineSettings};
use crate::units::to_pixels;
use crate::validation::PlacementError;

fn default_facings() -> u32 {
    1
}

/// Item carried by a drag from the product library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragPayload {
    pub product: ProductTemplate,
    #[serde(default = "default_facings")]
    pub facings: u32,
}

impl DragPayload {
    pub fn footprint(&self) -> ItemFootprint {
        ItemFootprint::of_product(&self.product, self.facings)
    }
}

/// Input events from the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    DragStart {
        payload: DragPayload,
    },
    DragOver {
        section_id: SectionId,
        position: [f64; 2],
    },
    Drop {
        section_id: SectionId,
        position: [f64; 2],
    },
    PointerDown {
        section_id: SectionId,
        component_id: ComponentId,
        position: [f64; 2],
    },
    PointerMove {
        position: [f64; 2],
    },
    PointerUp,
    PointerLeave,
    Cancel,
}

/// An in-progress drag of an already placed component
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingDrag {
    pub section_id: SectionId,
    pub component_id: ComponentId,
    /// Header + row offset of the section, in pixels, captured on pointer-down
    content_offset_px: f64,
    /// Pointer position minus the item's top-left at pointer-down
    grab_offset: Vec2,
    /// Last validated position not yet committed (on-release mode)
    pending: Option<SnappedPosition>,
    /// Last position written to the scene during this gesture
    committed: Option<SnappedPosition>,
    undo_recorded: bool,
}

/// Drag state machine
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingNew {
        payload: DragPayload,
    },
    DraggingExisting(ExistingDrag),
}

/// What happened in response to one event
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    /// Event does not apply to the current state
    Ignored,
    DragStarted,
    /// Drag-over feedback; nothing is committed
    Preview(Result<SnappedPosition, PlacementError>),
    Placed(Placement),
    /// Drop or grab refused; the scene is unchanged
    Rejected(PlacementError),
    Grabbed { component_id: ComponentId },
    /// Move committed to the scene
    Moved(SnappedPosition),
    /// Move validated and held until release
    Pending(SnappedPosition),
    /// Invalid drag frame; the last valid position is kept
    FrameIgnored(PlacementError),
    /// Gesture ended; carries the final committed position, if any
    Released { committed: Option<SnappedPosition> },
    Cancelled,
}

/// Translates input events into validated scene mutations
#[derive(Debug, Default)]
pub struct InteractionController {
    state: DragState,
}

fn content_point(position: [f64; 2], content_offset_px: f64) -> Point {
    Point::new(position[0], position[1] - content_offset_px)
}

fn content_offset_px(section: &Section) -> f64 {
    to_pixels(section.content_offset())
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    /// Process one event. Events run to completion before the next one.
    pub fn handle(
        &mut self,
        scene: &mut SceneState,
        settings: &EngineSettings,
        event: PointerEvent,
    ) -> InteractionOutcome {
        match event {
            PointerEvent::DragStart { payload } => self.drag_start(payload),
            PointerEvent::DragOver {
                section_id,
                position,
            } => self.drag_over(scene, settings, &section_id, position),
            PointerEvent::Drop {
                section_id,
                position,
            } => self.drop_item(scene, settings, &section_id, position),
            PointerEvent::PointerDown {
                section_id,
                component_id,
                position,
            } => self.pointer_down(scene, section_id, component_id, position),
            PointerEvent::PointerMove { position } => self.pointer_move(scene, settings, position),
            PointerEvent::PointerUp => self.pointer_up(scene),
            PointerEvent::PointerLeave => self.pointer_leave(),
            PointerEvent::Cancel => self.cancel(),
        }
    }

    fn drag_start(&mut self, payload: DragPayload) -> InteractionOutcome {
        if !self.is_idle() {
            return InteractionOutcome::Ignored;
        }
        tracing::debug!("Drag started for product '{}'", payload.product.name);
        self.state = DragState::DraggingNew { payload };
        InteractionOutcome::DragStarted
    }

    fn drag_over(
        &self,
        scene: &SceneState,
        settings: &EngineSettings,
        section_id: &str,
        position: [f64; 2],
    ) -> InteractionOutcome {
        let DragState::DraggingNew { payload } = &self.state else {
            return InteractionOutcome::Ignored;
        };
        let preview = scene.require_section(section_id).and_then(|section| {
            let raw = content_point(position, content_offset_px(section));
            scene.preview_placement(section_id, &payload.footprint(), raw, &settings.snap, None)
        });
        InteractionOutcome::Preview(preview)
    }

    fn drop_item(
        &mut self,
        scene: &mut SceneState,
        settings: &EngineSettings,
        section_id: &str,
        position: [f64; 2],
    ) -> InteractionOutcome {
        if !matches!(self.state, DragState::DraggingNew { .. }) {
            return InteractionOutcome::Ignored;
        }
        let DragState::DraggingNew { payload } = std::mem::take(&mut self.state) else {
            return InteractionOutcome::Ignored;
        };

        let result = scene.require_section(section_id).map(content_offset_px).and_then(|offset| {
            let raw = content_point(position, offset);
            scene.place_product(section_id, &payload.product, payload.facings, raw, &settings.snap)
        });

        match result {
            Ok(placement) => InteractionOutcome::Placed(placement),
            Err(e) => {
                tracing::warn!("Drop of '{}' rejected: {}", payload.product.name, e);
                InteractionOutcome::Rejected(e)
            }
        }
    }

    fn pointer_down(
        &mut self,
        scene: &SceneState,
        section_id: SectionId,
        component_id: ComponentId,
        position: [f64; 2],
    ) -> InteractionOutcome {
        if !self.is_idle() {
            return InteractionOutcome::Ignored;
        }
        let section = match scene.require_section(&section_id) {
            Ok(s) => s,
            Err(e) => return InteractionOutcome::Rejected(e),
        };
        let Some(component) = section.component(&component_id) else {
            return InteractionOutcome::Rejected(PlacementError::UnknownComponent(component_id));
        };

        let offset = content_offset_px(section);
        let pointer = content_point(position, offset);
        let grab_offset = pointer - Point::new(component.x, component.y);

        self.state = DragState::DraggingExisting(ExistingDrag {
            section_id,
            component_id: component_id.clone(),
            content_offset_px: offset,
            grab_offset,
            pending: None,
            committed: None,
            undo_recorded: false,
        });
        InteractionOutcome::Grabbed { component_id }
    }

    fn pointer_move(
        &mut self,
        scene: &mut SceneState,
        settings: &EngineSettings,
        position: [f64; 2],
    ) -> InteractionOutcome {
        let DragState::DraggingExisting(drag) = &mut self.state else {
            return InteractionOutcome::Ignored;
        };
        let raw = content_point(position, drag.content_offset_px) - drag.grab_offset;

        match settings.drag.commit_mode {
            CommitMode::Continuous => {
                match scene.move_placed(
                    &drag.section_id,
                    &drag.component_id,
                    raw,
                    &settings.snap,
                    !drag.undo_recorded,
                ) {
                    Ok(pos) => {
                        drag.undo_recorded = true;
                        drag.committed = Some(pos);
                        InteractionOutcome::Moved(pos)
                    }
                    Err(e) => {
                        tracing::debug!("Ignoring drag frame for {}: {}", drag.component_id, e);
                        InteractionOutcome::FrameIgnored(e)
                    }
                }
            }
            CommitMode::OnRelease => {
                match scene.preview_move(&drag.section_id, &drag.component_id, raw, &settings.snap) {
                    Ok(pos) => {
                        drag.pending = Some(pos);
                        InteractionOutcome::Pending(pos)
                    }
                    Err(e) => {
                        tracing::debug!("Ignoring drag frame for {}: {}", drag.component_id, e);
                        InteractionOutcome::FrameIgnored(e)
                    }
                }
            }
        }
    }

    fn pointer_up(&mut self, scene: &mut SceneState) -> InteractionOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => InteractionOutcome::Ignored,
            // Drag from the library ended outside any section
            DragState::DraggingNew { .. } => InteractionOutcome::Released { committed: None },
            DragState::DraggingExisting(drag) => {
                let mut committed = drag.committed;
                if let Some(pending) = drag.pending {
                    match scene.commit_move(&drag.section_id, &drag.component_id, pending, true) {
                        Ok(()) => committed = Some(pending),
                        Err(e) => tracing::warn!("Pending move of {} dropped: {}", drag.component_id, e),
                    }
                }
                InteractionOutcome::Released { committed }
            }
        }
    }

    fn pointer_leave(&mut self) -> InteractionOutcome {
        // A library drag may re-enter the surface; only moves end here
        if !matches!(self.state, DragState::DraggingExisting(_)) {
            return InteractionOutcome::Ignored;
        }
        match std::mem::take(&mut self.state) {
            DragState::DraggingExisting(drag) => InteractionOutcome::Released {
                committed: drag.committed,
            },
            _ => InteractionOutcome::Ignored,
        }
    }

    fn cancel(&mut self) -> InteractionOutcome {
        if self.is_idle() {
            return InteractionOutcome::Ignored;
        }
        self.state = DragState::Idle;
        InteractionOutcome::Cancelled
    }
}
