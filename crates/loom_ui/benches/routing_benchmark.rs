//! # Routing Benchmark
//!
//! Hot paths of the update thread:
//! 1. Pointer move over a deep tree (hit path + hover bookkeeping)
//! 2. Press/release on a button (capture, target, capture release)
//! 3. Tab traversal over a wide focus set
//! 4. Drawing the whole scene into a reused draw list
//!
//! Target: routing an event stays well under a microsecond per tree level.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use loom_ui::geometry::{Layout, Point, Rect};
use loom_ui::render::{DrawList, NoSprites};
use loom_ui::{Color, Forest, InputEvent, Key, Modifiers, MouseButton, NodeId, Router, Scene, SceneNode, Theme, UiConfig, WidgetKind};

const VIEWPORT: Rect = Rect::from_size(1920.0, 1080.0);

/// A root with `depth` nested panels, then a grid of `columns` × `rows` buttons.
fn build(depth: usize, columns: usize, rows: usize) -> (Scene, Forest, NodeId) {
    let mut scene = Scene::with_capacity(depth + columns * rows + 8);
    let root = scene.create(SceneNode::new(WidgetKind::panel(Color::BLACK)).with_local(VIEWPORT));

    let mut parent = root;
    for _ in 0..depth {
        let inner = scene.create(
            SceneNode::new(WidgetKind::panel(Color::rgb(0.1, 0.1, 0.1))).with_local(Rect::new(2.0, 2.0, 1800.0, 1000.0)),
        );
        scene.append_child(parent, inner).unwrap();
        parent = inner;
    }

    let column = scene.create(
        SceneNode::new(WidgetKind::Stack {
            layout: Layout::vertical().with_gap(4.0),
        })
        .with_local(Rect::new(0.0, 0.0, 1800.0, 1000.0)),
    );
    scene.append_child(parent, column).unwrap();
    for _ in 0..rows {
        let row = scene.create(
            SceneNode::new(WidgetKind::Stack {
                layout: Layout::horizontal().with_gap(4.0),
            })
            .with_local(Rect::from_size(1800.0, 24.0)),
        );
        scene.append_child(column, row).unwrap();
        for _ in 0..columns {
            let button = scene.create(SceneNode::new(WidgetKind::button("Cell")).with_local(Rect::from_size(40.0, 24.0)));
            scene.append_child(row, button).unwrap();
        }
    }

    scene.layout(root, VIEWPORT, &NoSprites);
    let mut forest = Forest::new();
    forest.rebuild([(0, root)]);
    (scene, forest, root)
}

fn bench_pointer_move(c: &mut Criterion) {
    let (mut scene, forest, _) = build(16, 20, 20);
    let mut router = Router::new(&UiConfig::default());
    let mut x = 0.0_f32;

    c.bench_function("route_pointer_move_depth16", |b| {
        b.iter(|| {
            x = (x + 13.0) % 800.0;
            router.route(&mut scene, &forest, black_box(InputEvent::PointerMove { pos: Point::new(x, 100.0) }))
        });
    });
}

fn bench_click(c: &mut Criterion) {
    let (mut scene, forest, _) = build(4, 20, 20);
    let mut router = Router::new(&UiConfig::default());
    let pos = Point::new(60.0, 40.0);

    c.bench_function("route_button_click", |b| {
        b.iter(|| {
            router.route(&mut scene, &forest, InputEvent::PointerDown { pos, button: MouseButton::Left });
            router.route(&mut scene, &forest, InputEvent::PointerUp { pos, button: MouseButton::Left })
        });
    });
}

fn bench_tab(c: &mut Criterion) {
    let (mut scene, forest, _) = build(2, 20, 20);
    let mut router = Router::new(&UiConfig::default());
    let tab = InputEvent::Key {
        key: Key::Tab,
        modifiers: Modifiers::NONE,
        pressed: true,
    };

    c.bench_function("route_tab_400_focusable", |b| {
        b.iter(|| router.route(&mut scene, &forest, black_box(tab)));
    });
}

fn bench_draw(c: &mut Criterion) {
    let (scene, _, root) = build(4, 20, 20);
    let mut list = DrawList::with_capacity(4096);
    let mut generation = 0;

    c.bench_function("draw_scene_400_buttons", |b| {
        b.iter(|| {
            generation += 1;
            list.reset(generation);
            scene.draw(root, &NoSprites, &Theme::DARK, &mut list);
            black_box(list.quads().len())
        });
    });
}

criterion_group!(benches, bench_pointer_move, bench_click, bench_tab, bench_draw);
criterion_main!(benches);
