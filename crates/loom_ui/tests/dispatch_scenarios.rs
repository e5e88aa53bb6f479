//! # Dispatch Scenarios
//!
//! End-to-end routing checks over small scenes:
//! topmost hit-testing, the full drag-and-drop sequence, modal dismissal,
//! tab order, and slot handling when the tree changes under the router.
//!
//! Run with: cargo test -p loom_ui --test dispatch_scenarios

use std::sync::Arc;

use loom_ui::drag::{DragPayload, DragVisual, PayloadKind};
use loom_ui::focus;
use loom_ui::render::NoSprites;
use loom_ui::signal::SignalValue;
use loom_ui::{
    CloseReason, Color, DragPhase, Forest, InputEvent, MouseButton, NodeId, Point, Rect, Router, Scene, SceneNode,
    SignalBus, UiConfig, UiEvent, WidgetKind,
};

const VIEWPORT: Rect = Rect::from_size(800.0, 600.0);

fn router() -> Router {
    let mut config = UiConfig::default();
    config.viewport.width = VIEWPORT.width;
    config.viewport.height = VIEWPORT.height;
    config.diagnostics.dispatch_log_capacity = 512;
    Router::new(&config)
}

fn root(scene: &mut Scene, local: Rect) -> NodeId {
    scene.create(SceneNode::new(WidgetKind::panel(Color::BLACK)).with_local(local))
}

fn child(scene: &mut Scene, parent: NodeId, node: SceneNode) -> NodeId {
    let id = scene.create(node);
    scene.append_child(parent, id).unwrap();
    id
}

fn press(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerDown {
        pos: Point::new(x, y),
        button: MouseButton::Left,
    }
}

fn release(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerUp {
        pos: Point::new(x, y),
        button: MouseButton::Left,
    }
}

fn move_to(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerMove { pos: Point::new(x, y) }
}

fn drag_phases(router: &Router, node: NodeId) -> Vec<DragPhase> {
    router
        .log()
        .iter()
        .filter(|d| d.node == node)
        .filter_map(|d| match d.event {
            UiEvent::Drag { phase, .. } => Some(phase),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Hit testing
// =============================================================================

#[test]
fn test_higher_layer_hit_first() {
    let mut scene = Scene::new();
    let overlay = root(&mut scene, Rect::new(0.0, 0.0, 200.0, 200.0));
    let world = root(&mut scene, VIEWPORT);
    scene.layout(overlay, VIEWPORT, &NoSprites);
    scene.layout(world, VIEWPORT, &NoSprites);

    let mut forest = Forest::new();
    forest.rebuild([(10, overlay), (0, world)]);

    let mut path = Vec::new();
    assert_eq!(forest.hit_path(&scene, Point::new(50.0, 50.0), &mut path), Some(overlay));
    path.clear();
    assert_eq!(forest.hit_path(&scene, Point::new(500.0, 500.0), &mut path), Some(world));
}

#[test]
fn test_equal_layers_later_registration_on_top() {
    let mut scene = Scene::new();
    let first = root(&mut scene, VIEWPORT);
    let second = root(&mut scene, VIEWPORT);
    scene.layout(first, VIEWPORT, &NoSprites);
    scene.layout(second, VIEWPORT, &NoSprites);

    let mut forest = Forest::new();
    forest.rebuild([(0, first), (0, second)]);

    let mut path = Vec::new();
    assert_eq!(forest.hit_path(&scene, Point::new(10.0, 10.0), &mut path), Some(second));
}

#[test]
fn test_later_sibling_on_top_and_clip_respected() {
    let mut scene = Scene::new();
    let r = root(&mut scene, Rect::new(0.0, 0.0, 100.0, 100.0));
    let under = child(&mut scene, r, SceneNode::new(WidgetKind::image("a")).with_local(Rect::new(0.0, 0.0, 80.0, 80.0)));
    let over = child(&mut scene, r, SceneNode::new(WidgetKind::image("b")).with_local(Rect::new(40.0, 40.0, 120.0, 120.0)));
    scene.layout(r, VIEWPORT, &NoSprites);

    let mut path = Vec::new();
    assert!(scene.hit_path(r, Point::new(50.0, 50.0), &mut path));
    assert_eq!(path, vec![r, over]);

    path.clear();
    assert!(scene.hit_path(r, Point::new(10.0, 10.0), &mut path));
    assert_eq!(path, vec![r, under]);

    // Inside `over`'s rect but outside the root's clip.
    path.clear();
    assert!(!scene.hit_path(r, Point::new(150.0, 150.0), &mut path));
    assert!(path.is_empty());
}

#[test]
fn test_pass_through_root_reaches_lower_layer() {
    let mut scene = Scene::new();
    let world = root(&mut scene, VIEWPORT);
    let hud = scene.create(
        SceneNode::new(WidgetKind::panel(Color::TRANSPARENT))
            .with_local(VIEWPORT)
            .with_hit_test(false, true),
    );
    let chip = child(&mut scene, hud, SceneNode::new(WidgetKind::button("chip")).with_local(Rect::new(0.0, 0.0, 40.0, 20.0)));
    scene.layout(world, VIEWPORT, &NoSprites);
    scene.layout(hud, VIEWPORT, &NoSprites);

    let mut forest = Forest::new();
    forest.rebuild([(0, world), (1, hud)]);

    let mut path = Vec::new();
    assert_eq!(forest.hit_path(&scene, Point::new(10.0, 10.0), &mut path), Some(hud));
    assert_eq!(path.last(), Some(&chip));
    path.clear();
    assert_eq!(forest.hit_path(&scene, Point::new(400.0, 400.0), &mut path), Some(world));
}

// =============================================================================
// Drag and drop
// =============================================================================

#[test]
fn test_drag_citizen_onto_house() {
    let mut scene = Scene::new();
    let r = root(&mut scene, VIEWPORT);
    let source = child(
        &mut scene,
        r,
        SceneNode::new(WidgetKind::drag_source(
            DragPayload::new(PayloadKind::Citizen).with_str("ent42"),
            DragVisual::default(),
        ))
        .with_local(Rect::new(0.0, 0.0, 50.0, 50.0)),
    );
    let house = child(
        &mut scene,
        r,
        SceneNode::new(WidgetKind::drop_target([PayloadKind::Citizen]).with_topic("housing.assign"))
            .with_local(Rect::new(100.0, 0.0, 100.0, 100.0)),
    );
    scene.layout(r, VIEWPORT, &NoSprites);
    let mut forest = Forest::new();
    forest.rebuild([(0, r)]);

    let bus = Arc::new(SignalBus::new(8));
    let assigned = bus.subscribe("housing.assign");
    let mut router = router();
    router.set_signal_bus(Arc::clone(&bus));

    router.route(&mut scene, &forest, press(10.0, 10.0));
    assert!(router.drag().is_armed());

    router.route(&mut scene, &forest, move_to(20.0, 10.0));
    assert!(router.drag().is_active());
    assert_eq!(drag_phases(&router, source).first(), Some(&DragPhase::Begin));

    router.route(&mut scene, &forest, move_to(150.0, 50.0));
    assert_eq!(drag_phases(&router, house), vec![DragPhase::Enter, DragPhase::Over]);
    assert_eq!(router.drag().session().and_then(|s| s.drop_target), Some(house));

    router.route(&mut scene, &forest, release(150.0, 50.0));
    assert_eq!(
        drag_phases(&router, house),
        vec![DragPhase::Enter, DragPhase::Over, DragPhase::Drop]
    );
    let source_phases = drag_phases(&router, source);
    assert_eq!(source_phases.last(), Some(&DragPhase::End));
    assert!(!source_phases.contains(&DragPhase::Cancel));
    assert!(router.drag().session().is_none());

    let signal = assigned.try_recv().unwrap();
    assert_eq!(signal.value.field("s0").and_then(SignalValue::as_str), Some("ent42"));
    assert_eq!(signal.value.field("kind").and_then(SignalValue::as_str), Some("Citizen"));
}

#[test]
fn test_short_press_on_source_is_not_a_drag() {
    let mut scene = Scene::new();
    let r = root(&mut scene, VIEWPORT);
    let source = child(
        &mut scene,
        r,
        SceneNode::new(WidgetKind::drag_source(DragPayload::new(PayloadKind::Item), DragVisual::default()))
            .with_local(Rect::new(0.0, 0.0, 50.0, 50.0)),
    );
    scene.layout(r, VIEWPORT, &NoSprites);
    let mut forest = Forest::new();
    forest.rebuild([(0, r)]);
    let mut router = router();

    router.route(&mut scene, &forest, press(10.0, 10.0));
    router.route(&mut scene, &forest, move_to(11.0, 11.0));
    router.route(&mut scene, &forest, release(11.0, 11.0));

    assert!(router.drag().session().is_none());
    assert!(drag_phases(&router, source).is_empty());
}

// =============================================================================
// Modal
// =============================================================================

#[test]
fn test_outside_click_cancels_modal() {
    let mut scene = Scene::new();
    let r = root(&mut scene, VIEWPORT);
    scene.layout(r, VIEWPORT, &NoSprites);
    let mut forest = Forest::new();
    forest.rebuild([(0, r)]);

    let popup = scene.create(SceneNode::new(WidgetKind::popup()).with_local(Rect::from_size(120.0, 80.0)));
    let mut router = router();
    router
        .open_modal(&mut scene, popup, Rect::new(100.0, 100.0, 50.0, 50.0), &NoSprites)
        .unwrap();
    assert!(router.modal().is_active());
    assert_eq!(scene.get(popup).unwrap().rect(), Rect::new(100.0, 154.0, 120.0, 80.0));

    assert!(router.route(&mut scene, &forest, press(500.0, 500.0)));

    assert!(!router.modal().is_active());
    assert!(router
        .log()
        .iter()
        .any(|d| d.node == popup && d.event == UiEvent::PopupClosed(CloseReason::Cancelled)));
    // Nothing below the modal saw the press.
    assert!(router.log().iter().all(|d| d.node != r));
}

#[test]
fn test_click_inside_popup_stays_open() {
    let mut scene = Scene::new();
    let r = root(&mut scene, VIEWPORT);
    scene.layout(r, VIEWPORT, &NoSprites);
    let mut forest = Forest::new();
    forest.rebuild([(0, r)]);

    let popup = scene.create(SceneNode::new(WidgetKind::popup()).with_local(Rect::from_size(120.0, 80.0)));
    let mut router = router();
    router
        .open_modal(&mut scene, popup, Rect::new(100.0, 100.0, 50.0, 50.0), &NoSprites)
        .unwrap();

    assert!(router.route(&mut scene, &forest, press(150.0, 180.0)));
    assert!(router.modal().is_active());
    assert!(matches!(scene.get(popup).unwrap().kind, WidgetKind::Popup { open: true, .. }));
}

// =============================================================================
// Focus
// =============================================================================

#[test]
fn test_tab_index_order() {
    let mut scene = Scene::new();
    let r = root(&mut scene, VIEWPORT);
    let a = child(&mut scene, r, SceneNode::new(WidgetKind::button("A")).with_tab_index(0));
    let b = child(&mut scene, r, SceneNode::new(WidgetKind::button("B")).with_tab_index(1));
    let c = child(&mut scene, r, SceneNode::new(WidgetKind::button("C")).with_tab_index(0));

    assert_eq!(focus::tab_order(&scene, r), vec![b, a, c]);
    for id in [a, b, c] {
        let next = focus::next_by_tab(&scene, r, Some(id));
        assert_eq!(focus::prev_by_tab(&scene, r, next), Some(id));
    }
}

// =============================================================================
// Tree changes under the router
// =============================================================================

fn two_views() -> (Scene, Forest, NodeId, NodeId, NodeId) {
    let mut scene = Scene::new();
    let left = root(&mut scene, Rect::new(0.0, 0.0, 400.0, 600.0));
    let right = root(&mut scene, Rect::new(400.0, 0.0, 400.0, 600.0));
    let button = child(
        &mut scene,
        left,
        SceneNode::new(WidgetKind::button("Move me")).with_local(Rect::new(10.0, 10.0, 100.0, 30.0)),
    );
    scene.layout(left, VIEWPORT, &NoSprites);
    scene.layout(right, VIEWPORT, &NoSprites);
    let mut forest = Forest::new();
    forest.rebuild([(0, left), (0, right)]);
    (scene, forest, left, right, button)
}

#[test]
fn test_reparent_keeps_focus_identity() {
    let (mut scene, forest, _, right, button) = two_views();
    let mut router = router();
    router.set_focus(&mut scene, Some(button));

    scene.reparent(button, right).unwrap();
    scene.layout(right, VIEWPORT, &NoSprites);
    router.sanitize(&mut scene, &forest);

    assert_eq!(router.focus(), Some(button));
    assert_eq!(scene.parent(button), Some(right));
}

#[test]
fn test_orphaned_focus_cleared() {
    let (mut scene, forest, _, _, button) = two_views();
    let mut router = router();
    router.set_focus(&mut scene, Some(button));

    scene.detach(button).unwrap();
    router.sanitize(&mut scene, &forest);

    assert_eq!(router.focus(), None);
    assert!(scene.contains(button));
}

#[test]
fn test_destroyed_capture_cleared_and_handle_stale() {
    let (mut scene, forest, left, _, button) = two_views();
    let mut router = router();
    router.route(&mut scene, &forest, press(20.0, 20.0));
    assert_eq!(router.capture(), Some(button));

    scene.destroy(left).unwrap();
    assert!(!scene.contains(button));

    // The release lands on nothing: the dead capture is dropped first.
    assert!(!router.route(&mut scene, &forest, release(20.0, 20.0)));
    assert_eq!(router.capture(), None);
    assert_eq!(router.focus(), None);

    // A new node may reuse the slot; the old handle stays dead.
    let fresh = scene.create(SceneNode::new(WidgetKind::button("new")));
    assert_ne!(fresh, button);
    assert!(!scene.contains(button));
}
