use roomcraft_core::geometry::{Point2, Vector3, snap_to_grid, wall_length};
use roomcraft_core::model::{NewFurniture, Transform};
use roomcraft_engine::interaction::{Interaction, Key, KeyEvent, PointerEvent, SceneController};
use roomcraft_engine::session::{EditorSession, Selection, Tool};

fn editor() -> (EditorSession, SceneController) {
    let mut session = EditorSession::default();
    session.start_new_project();
    (session, SceneController::new())
}

fn click(
    controller: &mut SceneController,
    session: &mut EditorSession,
    x: f64,
    z: f64,
) -> Interaction {
    controller.handle_pointer(session, PointerEvent::FloorClick(Point2::new(x, z)))
}

#[test]
fn default_room_is_closed_rectangle() {
    let (session, _) = editor();
    let project = session.project().expect("project");
    assert_eq!(project.walls.len(), 4);
    assert!(project.furniture.is_empty());

    let perimeter: f64 = project.walls.iter().map(wall_length).sum();
    assert!((perimeter - 40.0).abs() < 1e-9);
    for (i, wall) in project.walls.iter().enumerate() {
        let next = &project.walls[(i + 1) % project.walls.len()];
        assert_eq!(wall.end, next.start);
    }
}

#[test]
fn clicking_same_point_twice_creates_no_wall() {
    let (mut session, mut controller) = editor();
    session.set_active_tool(Tool::Wall);

    assert_eq!(
        click(&mut controller, &mut session, 0.0, 0.0),
        Interaction::DraftStarted(Point2::new(0.0, 0.0))
    );
    assert_eq!(
        click(&mut controller, &mut session, 0.0, 0.0),
        Interaction::DegenerateSkipped(Point2::new(0.0, 0.0))
    );
    assert_eq!(session.project().unwrap().walls.len(), 4);
    assert!(session.is_drawing_wall());
}

#[test]
fn wall_start_is_snapped_to_grid() {
    let (mut session, mut controller) = editor();
    controller.handle_key(&mut session, KeyEvent::plain(Key::Char('w')));
    click(&mut controller, &mut session, 1.24, 3.76);

    assert!(session.is_drawing_wall());
    assert_eq!(session.wall_start_point(), Some(Point2::new(1.0, 4.0)));
}

#[test]
fn delete_key_removes_selected_furniture() {
    let (mut session, mut controller) = editor();
    let keep = session
        .add_furniture(NewFurniture::new("Plant Pot", "Decor"))
        .unwrap();
    let id = session
        .add_furniture(NewFurniture::new("Sofa", "Living Room"))
        .unwrap();
    controller.handle_pointer(&mut session, PointerEvent::FurnitureClick(id));

    let outcome = controller.handle_key(&mut session, KeyEvent::plain(Key::Delete));
    assert_eq!(outcome, Interaction::Deleted(Selection::Furniture(id)));

    let project = session.project().unwrap();
    assert_eq!(project.furniture.len(), 1);
    assert_eq!(project.furniture[0].id, keep);
    assert!(session.selection().is_none());
}

#[test]
fn backspace_removes_selected_wall() {
    let (mut session, mut controller) = editor();
    let wall = session.project().unwrap().walls[1].id;
    let outcome = controller.handle_pointer(&mut session, PointerEvent::WallClick(wall));
    assert_eq!(outcome, Interaction::Selected(Selection::Wall(wall)));

    let outcome = controller.handle_key(&mut session, KeyEvent::plain(Key::Backspace));
    assert_eq!(outcome, Interaction::Deleted(Selection::Wall(wall)));

    let project = session.project().unwrap();
    assert_eq!(project.walls.len(), 3);
    assert!(project.wall(wall).is_none());
    assert!(session.selection().is_none());
}

#[test]
fn switching_tool_mid_draft_cancels_without_commit() {
    let (mut session, mut controller) = editor();
    session.set_active_tool(Tool::Wall);
    click(&mut controller, &mut session, 2.0, 2.0);
    controller.handle_pointer(&mut session, PointerEvent::FloorMove(Point2::new(4.0, 2.0)));
    assert!(controller.wall_preview(&session).is_some());

    let outcome = controller.handle_key(&mut session, KeyEvent::plain(Key::Char('v')));
    assert_eq!(
        outcome,
        Interaction::ToolChanged {
            tool: Tool::Select,
            draft_cancelled: true
        }
    );
    assert!(!session.is_drawing_wall());
    assert_eq!(session.wall_start_point(), None);
    assert!(controller.wall_preview(&session).is_none());
    assert_eq!(session.project().unwrap().walls.len(), 4);
}

#[test]
fn chained_walls_leave_earlier_segments_untouched() {
    let (mut session, mut controller) = editor();
    session.set_active_tool(Tool::Wall);
    click(&mut controller, &mut session, 0.0, 0.0);

    let Interaction::WallCommitted { id: first, next_start } =
        click(&mut controller, &mut session, 2.0, 0.0)
    else {
        panic!("first segment should commit");
    };
    assert_eq!(next_start, Point2::new(2.0, 0.0));
    let snapshot = session.project().unwrap().wall(first).cloned().unwrap();

    let Interaction::WallCommitted { id: second, .. } =
        click(&mut controller, &mut session, 2.0, 3.0)
    else {
        panic!("second segment should commit");
    };
    assert_ne!(first, second);

    let project = session.project().unwrap();
    assert_eq!(project.wall(first), Some(&snapshot));
    assert_eq!(project.wall(second).unwrap().start, snapshot.end);
    assert_eq!(project.walls.len(), 6);
}

#[test]
fn escape_reverts_to_select_tool() {
    let (mut session, mut controller) = editor();
    controller.handle_key(&mut session, KeyEvent::plain(Key::Char('w')));
    click(&mut controller, &mut session, 1.0, 1.0);

    let outcome = controller.handle_key(&mut session, KeyEvent::plain(Key::Escape));
    assert_eq!(outcome, Interaction::Escaped { draft_cancelled: true });
    assert_eq!(session.active_tool(), Tool::Select);
    assert!(!session.is_drawing_wall());
}

#[test]
fn gizmo_release_persists_transform() {
    let (mut session, mut controller) = editor();
    let id = session
        .add_furniture(NewFurniture::new("Desk", "Office"))
        .unwrap();
    controller.handle_pointer(&mut session, PointerEvent::FurnitureClick(id));
    controller.handle_key(&mut session, KeyEvent::plain(Key::Char('g')));
    assert!(SceneController::gizmo_target(&session).is_some());

    let transform = Transform {
        position: Vector3::new(3.0, 0.375, -2.0),
        rotation: Vector3::new(0.0, 1.0, 0.0),
        scale: Vector3::new(1.4, 0.75, 0.7),
    };
    let outcome =
        controller.handle_pointer(&mut session, PointerEvent::TransformEnd { id, transform });
    assert_eq!(outcome, Interaction::Transformed(id));
    let item = session.project().unwrap().furniture_item(id).unwrap();
    assert_eq!(item.transform(), transform);
}

#[test]
fn ids_stay_unique_across_adds_and_duplicates() {
    let (mut session, mut controller) = editor();
    let id = session
        .add_furniture(NewFurniture::new("Chair", "Dining"))
        .unwrap();
    controller.handle_pointer(&mut session, PointerEvent::FurnitureClick(id));
    for _ in 0..5 {
        controller.handle_key(&mut session, KeyEvent::ctrl(Key::Char('d')));
    }
    let project = session.project().unwrap();
    let mut ids: Vec<_> = project.furniture.iter().map(|item| item.id).collect();
    ids.sort_by_key(|id| id.get());
    ids.dedup();
    assert_eq!(ids.len(), 6);
}

#[test]
fn snapping_is_idempotent_over_a_sweep() {
    for i in -40..=40 {
        for j in -40..=40 {
            let p = Point2::new(i as f64 * 0.137, j as f64 * -0.291);
            let once = snap_to_grid(p, 0.5);
            assert_eq!(snap_to_grid(once, 0.5), once);
        }
    }
}
