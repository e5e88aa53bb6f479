//! # Runtime Frame Tests
//!
//! The runtime on one thread, a reader on another. The reader must only see
//! whole frames: every latched draw list carries the same quad count the
//! producer drew for that generation, and generations never go backwards.
//!
//! Run with: cargo test -p loom_ui --test runtime_frames

use std::thread;

use loom_ui::render::NoSprites;
use loom_ui::{Color, InputEvent, Point, Rect, SceneNode, UiConfig, UiRuntime, WidgetKind};

const TICKS: u32 = 2_000;
const BUTTONS: usize = 32;

#[test]
fn test_consumer_sees_complete_frames() {
    let (mut runtime, mut consumer) = UiRuntime::new(UiConfig::default(), NoSprites).unwrap();
    let scene = runtime.scene_mut();
    let root = scene.create(SceneNode::new(WidgetKind::panel(Color::BLACK)).with_local(Rect::from_size(1920.0, 1080.0)));
    for i in 0..BUTTONS {
        let x = (i % 8) as f32 * 100.0;
        let y = (i / 8) as f32 * 40.0;
        let button = scene.create(SceneNode::new(WidgetKind::button("b")).with_local(Rect::new(x, y, 90.0, 30.0)));
        scene.append_child(root, button).unwrap();
    }
    runtime.add_view("grid", root, 0).unwrap();
    let input = runtime.input_sender();

    let producer = thread::spawn(move || {
        let mut published = 0_u64;
        for tick in 0..TICKS {
            // Hovering a new button each tick invalidates every frame.
            let x = (tick % 8) as f32 * 100.0 + 5.0;
            let y = ((tick / 8) % 4) as f32 * 40.0 + 5.0;
            input.send(InputEvent::PointerMove { pos: Point::new(x, y) }).unwrap();
            if runtime.tick(1.0 / 60.0).published {
                published += 1;
            }
        }
        published
    });

    let mut last = 0_u64;
    while !producer.is_finished() || consumer.has_pending() {
        let front = consumer.acquire_front();
        let generation = front.generation();
        assert!(generation >= last, "generation went backwards: {generation} < {last}");
        if generation > 0 {
            // Panel plus one quad per button, no partial lists.
            assert_eq!(front.quads().len(), BUTTONS + 1);
            assert_eq!(front.text_runs().len(), BUTTONS);
        }
        last = generation;
    }

    let published = producer.join().unwrap();
    assert_eq!(last, published);
}

#[test]
fn test_stale_frame_redrawn_when_idle() {
    let (mut runtime, mut consumer) = UiRuntime::new(UiConfig::default(), NoSprites).unwrap();
    let root = runtime
        .scene_mut()
        .create(SceneNode::new(WidgetKind::panel(Color::WHITE)).with_local(Rect::from_size(10.0, 10.0)));
    runtime.add_view("only", root, 0).unwrap();
    runtime.tick(0.016);

    let first = consumer.acquire_front().generation();
    for _ in 0..5 {
        runtime.tick(0.016);
    }
    // Nothing changed: the consumer keeps presenting the same frame.
    assert!(!consumer.has_pending());
    assert_eq!(consumer.acquire_front().generation(), first);
}
