//! Integration tests for drag-and-drop gestures through a Session.
//!
//! Pointer positions are section-local: content starts 80 px below the
//! section top (6" header + 2" row offset).

use planogram_lib::fixtures::demo_catalog;
use planogram_lib::interaction::{DragPayload, DragState, InteractionOutcome, PointerEvent};
use planogram_lib::session::Session;
use planogram_lib::state::{CommitMode, EngineSettings};
use planogram_lib::validation::PlacementError;

const TOP: f64 = 80.0;

fn session_with_bay(settings: EngineSettings) -> (Session, String) {
    let mut s = Session::with_settings(demo_catalog(), settings);
    let fid = s.add_fixture("single-shelf", [0.0, 0.0]).unwrap();
    let sid = s.section_ids(&fid)[0].clone();
    (s, sid)
}

fn drag_and_drop(s: &mut Session, sid: &str, product_id: &str, position: [f64; 2]) -> InteractionOutcome {
    let product = s.catalog.product(product_id).unwrap().clone();
    assert_eq!(
        s.dispatch(PointerEvent::DragStart {
            payload: DragPayload { product, facings: 1 },
        }),
        InteractionOutcome::DragStarted
    );
    s.dispatch(PointerEvent::Drop {
        section_id: sid.to_string(),
        position,
    })
}

fn placed_id(outcome: InteractionOutcome) -> String {
    match outcome {
        InteractionOutcome::Placed(p) => p.component_id,
        other => panic!("Expected placement, got {other:?}"),
    }
}

#[test]
fn test_drop_then_drag_along_shelf() {
    let (mut s, sid) = session_with_bay(EngineSettings::default());
    let id = placed_id(drag_and_drop(&mut s, &sid, "cola-12oz", [100.0, TOP + 60.0]));

    s.dispatch(PointerEvent::PointerDown {
        section_id: sid.clone(),
        component_id: id.clone(),
        position: [110.0, TOP + 120.0],
    });
    assert!(matches!(s.controller.state(), DragState::DraggingExisting(_)));

    for step in 1..=5 {
        let x = 110.0 + step as f64 * 30.0;
        let out = s.dispatch(PointerEvent::PointerMove {
            position: [x, TOP + 120.0],
        });
        assert!(matches!(out, InteractionOutcome::Moved(_)), "step {step}: {out:?}");
        let c = s.scene.component(&sid, &id).unwrap();
        assert_eq!(c.x, 100.0 + step as f64 * 30.0);
        assert_eq!(c.y, 90.0);
    }

    s.dispatch(PointerEvent::PointerUp);
    assert!(s.controller.is_idle());

    // whole gesture is a single undo step
    assert!(s.undo());
    assert_eq!(s.scene.component(&sid, &id).unwrap().x, 100.0);
}

#[test]
fn test_drag_into_neighbor_is_ignored_per_frame() {
    let (mut s, sid) = session_with_bay(EngineSettings::default());
    let a = placed_id(drag_and_drop(&mut s, &sid, "cola-12oz", [0.0, TOP + 60.0]));
    let b = placed_id(drag_and_drop(&mut s, &sid, "cola-12oz", [200.0, TOP + 60.0]));

    s.dispatch(PointerEvent::PointerDown {
        section_id: sid.clone(),
        component_id: b.clone(),
        position: [200.0, TOP + 90.0],
    });
    let out = s.dispatch(PointerEvent::PointerMove {
        position: [100.0, TOP + 90.0],
    });
    assert!(matches!(out, InteractionOutcome::Moved(_)));

    // 4 px rounds to the 0 grid line, on top of the first item
    let out = s.dispatch(PointerEvent::PointerMove {
        position: [4.0, TOP + 90.0],
    });
    assert_eq!(out, InteractionOutcome::FrameIgnored(PlacementError::Overlap));
    assert_eq!(s.scene.component(&sid, &b).unwrap().x, 100.0);
    assert_eq!(s.scene.component(&sid, &a).unwrap().x, 0.0);

    // close to the first item's right edge: pulled flush
    let out = s.dispatch(PointerEvent::PointerMove {
        position: [31.0, TOP + 90.0],
    });
    assert!(matches!(out, InteractionOutcome::Moved(pos) if pos.x == 25.0), "{out:?}");

    s.dispatch(PointerEvent::PointerLeave);
    assert!(s.controller.is_idle());
}

#[test]
fn test_rejected_drop_reports_reason() {
    let (mut s, sid) = session_with_bay(EngineSettings::default());
    let out = drag_and_drop(&mut s, &sid, "chips-family", [470.0, TOP + 30.0]);
    assert_eq!(out, InteractionOutcome::Rejected(PlacementError::OutOfBounds));
    assert_eq!(s.component_count(), 0);
    assert!(s.controller.is_idle());
}

#[test]
fn test_drop_on_unknown_section() {
    let (mut s, _) = session_with_bay(EngineSettings::default());
    let out = drag_and_drop(&mut s, "ghost", "cola-12oz", [0.0, 0.0]);
    assert_eq!(
        out,
        InteractionOutcome::Rejected(PlacementError::UnknownSection("ghost".into()))
    );
}

#[test]
fn test_on_release_mode_mid_drag_state_is_unchanged() {
    let mut settings = EngineSettings::default();
    settings.drag.commit_mode = CommitMode::OnRelease;
    let (mut s, sid) = session_with_bay(settings);
    let id = placed_id(drag_and_drop(&mut s, &sid, "cola-12oz", [100.0, TOP + 60.0]));
    let version = s.scene.version();

    s.dispatch(PointerEvent::PointerDown {
        section_id: sid.clone(),
        component_id: id.clone(),
        position: [100.0, TOP + 90.0],
    });
    for x in [150.0, 200.0, 900.0] {
        s.dispatch(PointerEvent::PointerMove {
            position: [x, TOP + 90.0],
        });
    }
    assert_eq!(s.scene.version(), version);

    // the 900 px frame was invalid, so the last valid pending position wins
    let out = s.dispatch(PointerEvent::PointerUp);
    assert!(matches!(out, InteractionOutcome::Released { committed: Some(pos) } if pos.x == 200.0));
    assert_eq!(s.scene.component(&sid, &id).unwrap().x, 200.0);
}

#[test]
fn test_second_shelf_in_gondola() {
    let mut s = Session::new(demo_catalog());
    let fid = s.add_fixture("gondola-2x4", [0.0, 0.0]).unwrap();
    let sid = s.section_ids(&fid)[0].clone();

    // shelves: [0,140) [140,260) [260,380) [380,500); water is 105 px tall
    let out = drag_and_drop(&mut s, &sid, "water-1l", [40.0, TOP + 200.0]);
    let InteractionOutcome::Placed(p) = out else {
        panic!("Expected placement, got {out:?}");
    };
    assert_eq!(p.position.row_index, 1);
    assert_eq!(p.position.y, 260.0 - 105.0);

    let shelves = s.shelf_capacity(&sid).unwrap();
    assert_eq!(shelves[1].used_width, 3.5);
    assert_eq!(shelves[0].used_width, 0.0);
}

#[test]
fn test_move_to_lower_shelf_updates_row() {
    let mut s = Session::new(demo_catalog());
    let fid = s.add_fixture("gondola-2x4", [0.0, 0.0]).unwrap();
    let sid = s.section_ids(&fid)[0].clone();
    // shelf 2 band is [260, 380); cola is 50 px tall
    let shelf_2_y = 380.0 - 50.0;

    let a = placed_id(drag_and_drop(&mut s, &sid, "cola-12oz", [100.0, TOP + 60.0]));
    assert_eq!(s.scene.component(&sid, &a).unwrap().row_index, 0);

    let pos = s.move_component(&sid, &a, 100.0, 300.0).unwrap();
    assert_eq!((pos.row_index, pos.y), (2, shelf_2_y));
    let stored = s.scene.component(&sid, &a).unwrap();
    assert_eq!((stored.row_index, stored.y), (2, shelf_2_y));

    let b = placed_id(drag_and_drop(&mut s, &sid, "cola-12oz", [300.0, TOP + 60.0]));
    s.dispatch(PointerEvent::PointerDown {
        section_id: sid.clone(),
        component_id: b.clone(),
        position: [300.0, TOP + 90.0],
    });
    let out = s.dispatch(PointerEvent::PointerMove {
        position: [300.0, TOP + 300.0],
    });
    let InteractionOutcome::Moved(pos) = out else {
        panic!("Expected move, got {out:?}");
    };
    assert_eq!((pos.row_index, pos.y), (2, shelf_2_y));
    let stored = s.scene.component(&sid, &b).unwrap();
    assert_eq!((stored.row_index, stored.y), (2, shelf_2_y));
    s.dispatch(PointerEvent::PointerUp);

    let shelves = s.shelf_capacity(&sid).unwrap();
    assert_eq!(shelves[0].component_count, 0);
    assert_eq!(shelves[2].component_count, 2);
}
