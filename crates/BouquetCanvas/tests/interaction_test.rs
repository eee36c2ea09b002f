use bouquet_canvas::{
    Canvas, CanvasConfig, ColorToken, Flower, InteractionMode, LogicEvent, Species,
    input::PointerEvent,
    interaction::hit_test,
    model::{BouquetScene, Uuid},
};
use glam::Vec2;

fn create_test_scene() -> (BouquetScene, Uuid) {
    let mut scene = BouquetScene::new();
    let id = scene.add(Flower::new(
        Species::Rose,
        "#e11d48",
        Vec2::new(400.0, 300.0),
        ColorToken::new("#4d7c0f"),
    ));
    (scene, id)
}

#[test]
fn test_press_drag_release() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut scene, id) = create_test_scene();

    // 1. Press slightly right of the center
    let events = canvas.handle_pointer(&PointerEvent::down(Vec2::new(405.0, 300.0)), &mut scene);
    assert_eq!(
        events,
        vec![LogicEvent::SelectionChanged(Some(id)), LogicEvent::RepaintNeeded]
    );
    match canvas.interaction_mode {
        InteractionMode::Dragging { id: dragged, offset } => {
            assert_eq!(dragged, id);
            assert_eq!(offset, Vec2::new(5.0, 0.0));
        }
        other => panic!("Should be dragging, got {other:?}"),
    }

    // 2. Move: the grab offset is preserved
    let events = canvas.handle_pointer(&PointerEvent::moved(Vec2::new(455.0, 280.0)), &mut scene);
    assert_eq!(scene.get(id).unwrap().center, Vec2::new(450.0, 280.0));
    assert!(events.contains(&LogicEvent::FlowerMoved {
        id,
        center: Vec2::new(450.0, 280.0)
    }));

    // 3. Release keeps the selection
    canvas.handle_pointer(&PointerEvent::up(Vec2::new(455.0, 280.0)), &mut scene);
    assert_eq!(canvas.interaction_mode, InteractionMode::Selected { id });
}

#[test]
fn test_drag_is_clamped_to_margin() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut scene, id) = create_test_scene();

    canvas.handle_pointer(&PointerEvent::down(Vec2::new(400.0, 300.0)), &mut scene);
    let events = canvas.handle_pointer(&PointerEvent::moved(Vec2::new(-30.0, 900.0)), &mut scene);

    let expected = Vec2::new(50.0, 750.0);
    assert_eq!(scene.get(id).unwrap().center, expected);
    assert_eq!(
        events,
        vec![
            LogicEvent::FlowerMoved { id, center: expected },
            LogicEvent::RepaintNeeded
        ]
    );
}

#[test]
fn test_pointer_leave_ends_drag() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut scene, id) = create_test_scene();

    canvas.handle_pointer(&PointerEvent::down(Vec2::new(400.0, 300.0)), &mut scene);
    canvas.handle_pointer(&PointerEvent::leave(Vec2::new(900.0, 300.0)), &mut scene);
    assert_eq!(canvas.interaction_mode, InteractionMode::Selected { id });

    // Moving after the drag ended leaves the flower alone.
    let events = canvas.handle_pointer(&PointerEvent::moved(Vec2::new(100.0, 100.0)), &mut scene);
    assert!(events.is_empty());
    assert_eq!(scene.get(id).unwrap().center, Vec2::new(400.0, 300.0));
}

#[test]
fn test_miss_clears_selection() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut scene, id) = create_test_scene();
    canvas.select(Some(id), &scene);

    let events = canvas.handle_pointer(&PointerEvent::down(Vec2::new(10.0, 10.0)), &mut scene);

    assert_eq!(canvas.interaction_mode, InteractionMode::Idle);
    assert_eq!(
        events,
        vec![LogicEvent::SelectionChanged(None), LogicEvent::RepaintNeeded]
    );
}

#[test]
fn test_hit_radius_is_exclusive() {
    let config = CanvasConfig::default();
    let (scene, id) = create_test_scene();

    assert_eq!(hit_test(&scene, Vec2::new(424.9, 300.0), &config), Some(id));
    assert_eq!(hit_test(&scene, Vec2::new(425.0, 300.0), &config), None);
}

#[test]
fn test_hit_radius_scales_with_flower() {
    let config = CanvasConfig::default();
    let (mut scene, id) = create_test_scene();
    scene
        .update_flower(
            id,
            bouquet_canvas::FlowerUpdate {
                scale: Some(2.0),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(hit_test(&scene, Vec2::new(440.0, 300.0), &config), Some(id));
}

#[test]
fn test_topmost_flower_wins() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut scene, back) = create_test_scene();
    let front = scene.add(Flower::new(
        Species::Daisy,
        "#ffffff",
        Vec2::new(400.0, 310.0),
        ColorToken::new("#4d7c0f"),
    ));

    // Both flowers cover this point; the one painted last is picked.
    canvas.handle_pointer(&PointerEvent::down(Vec2::new(400.0, 305.0)), &mut scene);
    assert_eq!(canvas.selection(&scene), Some(front));
    assert_ne!(canvas.selection(&scene), Some(back));
}

#[test]
fn test_scaled_display_maps_to_canvas() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut scene, id) = create_test_scene();

    // Canvas shown at half size, offset by (10, 20).
    canvas.set_display(Vec2::new(10.0, 20.0), Vec2::new(400.0, 400.0));

    canvas.handle_pointer(&PointerEvent::down(Vec2::new(210.0, 170.0)), &mut scene);
    assert_eq!(canvas.selection(&scene), Some(id));

    canvas.handle_pointer(&PointerEvent::moved(Vec2::new(220.0, 170.0)), &mut scene);
    assert_eq!(scene.get(id).unwrap().center, Vec2::new(420.0, 300.0));
}

#[test]
fn test_removed_selection_resets_to_idle() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (mut scene, id) = create_test_scene();

    canvas.handle_pointer(&PointerEvent::down(Vec2::new(400.0, 300.0)), &mut scene);
    scene.remove(id);

    let events = canvas.handle_pointer(&PointerEvent::moved(Vec2::new(450.0, 300.0)), &mut scene);
    assert!(events.is_empty());
    assert_eq!(canvas.interaction_mode, InteractionMode::Idle);
    assert_eq!(canvas.selection(&scene), None);
}

#[test]
fn test_select_unknown_id_clears() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let (scene, id) = create_test_scene();

    canvas.select(Some(id), &scene);
    assert_eq!(canvas.selection(&scene), Some(id));

    canvas.select(Some(Uuid::new_v4()), &scene);
    assert_eq!(canvas.interaction_mode, InteractionMode::Idle);
}
