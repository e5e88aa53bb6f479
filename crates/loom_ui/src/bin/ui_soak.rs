//! # UI Soak Binary
//!
//! Drives a runtime on a producer thread with scripted input while a
//! consumer thread latches frames as fast as it can. Checks that the consumer
//! only ever sees complete frames with non-decreasing generations.
//!
//! ```text
//! cargo run --release --bin ui_soak -- [frames] [config.toml]
//! RUST_LOG=loom_ui=debug cargo run --bin ui_soak
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use loom_ui::drag::{DragPayload, DragVisual, PayloadKind};
use loom_ui::geometry::{Layout, Point, Rect};
use loom_ui::render::NoSprites;
use loom_ui::scene::SceneNode;
use loom_ui::style::Color;
use loom_ui::{InputEvent, MouseButton, UiConfig, UiResult, UiRuntime, WidgetKind};
use tracing_subscriber::EnvFilter;

const DEFAULT_FRAMES: u64 = 10_000;

fn build_hud(runtime: &mut UiRuntime) -> UiResult<()> {
    let scene = runtime.scene_mut();
    let root = scene.create(
        SceneNode::new(WidgetKind::panel(Color::hex(0x10_14_1c_ff)))
            .with_name("hud")
            .with_local(Rect::from_size(800.0, 600.0)),
    );

    let toolbar = scene.create(
        SceneNode::new(WidgetKind::Stack {
            layout: Layout::horizontal().with_gap(8.0).with_padding(8.0),
        })
        .with_local(Rect::new(0.0, 0.0, 800.0, 48.0)),
    );
    scene.append_child(root, toolbar)?;
    for label in ["Build", "Trade", "Map", "Settings"] {
        let button = scene.create(
            SceneNode::new(WidgetKind::button(label).with_topic(format!("toolbar.{label}")))
                .with_local(Rect::from_size(96.0, 32.0))
                .with_tooltip(label),
        );
        scene.append_child(toolbar, button)?;
    }

    let source = scene.create(
        SceneNode::new(WidgetKind::drag_source(
            DragPayload::new(PayloadKind::Citizen).with_str("ent42"),
            DragVisual::default(),
        ))
        .with_local(Rect::new(40.0, 200.0, 48.0, 48.0)),
    );
    scene.append_child(root, source)?;

    let target = scene.create(
        SceneNode::new(WidgetKind::drop_target([PayloadKind::Citizen]).with_topic("housing.assign"))
            .with_local(Rect::new(400.0, 200.0, 160.0, 160.0)),
    );
    scene.append_child(root, target)?;

    runtime.add_view("hud", root, 0)
}

/// One scripted gesture cycle: hover the toolbar, click, then drag the
/// citizen onto the house.
fn script(step: u64) -> Option<InputEvent> {
    let left = MouseButton::Left;
    let event = match step % 8 {
        0 => InputEvent::PointerMove { pos: Point::new(56.0, 24.0) },
        1 => InputEvent::PointerDown { pos: Point::new(56.0, 24.0), button: left },
        2 => InputEvent::PointerUp { pos: Point::new(56.0, 24.0), button: left },
        3 => InputEvent::PointerDown { pos: Point::new(60.0, 220.0), button: left },
        4 => InputEvent::PointerMove { pos: Point::new(200.0, 240.0) },
        5 => InputEvent::PointerMove { pos: Point::new(480.0, 280.0) },
        6 => InputEvent::PointerUp { pos: Point::new(480.0, 280.0), button: left },
        _ => return None,
    };
    Some(event)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("loom_ui=info")))
        .init();

    let mut args = std::env::args().skip(1);
    let frames = args.next().map(|a| a.parse::<u64>()).transpose()?.unwrap_or(DEFAULT_FRAMES);
    let config = match args.next() {
        Some(path) => UiConfig::load(path)?,
        None => UiConfig::default(),
    };

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                        LOOM UI SOAK");
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  Frames:   {frames}");
    println!("  Viewport: {}x{}", config.viewport.width, config.viewport.height);
    println!();

    let (mut runtime, mut consumer) = UiRuntime::new(config, NoSprites)?;
    build_hud(&mut runtime)?;
    let drops = runtime.signals().subscribe("housing.assign");
    let input = runtime.input_sender();
    let done = Arc::new(AtomicBool::new(false));

    let started = Instant::now();
    let producer_done = Arc::clone(&done);
    let producer = thread::spawn(move || {
        let mut published = 0_u64;
        let mut routed = 0_u64;
        let mut dropped = 0_u64;
        for frame in 0..frames {
            if let Some(event) = script(frame) {
                if input.try_send(event).is_err() {
                    tracing::warn!(frame, "input queue full");
                }
            }
            let stats = runtime.tick(1.0 / 60.0);
            routed += u64::from(stats.events_routed);
            published += u64::from(stats.published);
            dropped += drops.try_iter().count() as u64;
        }
        producer_done.store(true, Ordering::Release);
        (published, routed, dropped)
    });

    let consumer_thread = thread::spawn(move || {
        let mut latched = 0_u64;
        let mut last = 0_u64;
        let mut regressions = 0_u64;
        while !done.load(Ordering::Acquire) || consumer.has_pending() {
            let front = consumer.acquire_front();
            let generation = front.generation();
            if generation < last {
                regressions += 1;
            }
            if generation != last {
                latched += 1;
                last = generation;
            }
            thread::yield_now();
        }
        (latched, last, regressions)
    });

    let (published, routed, dropped) = producer.join().map_err(|_| "producer thread panicked")?;
    let (latched, last, regressions) = consumer_thread.join().map_err(|_| "consumer thread panicked")?;
    let elapsed = started.elapsed();

    println!("  Routed:     {routed} events");
    println!("  Published:  {published} frames");
    println!("  Latched:    {latched} frames (last generation {last})");
    println!("  Drops seen: {dropped}");
    println!("  Elapsed:    {:.2?}", elapsed);
    println!();
    if regressions == 0 && last == published {
        println!("  ✓ consumer saw only complete, ordered frames");
        Ok(())
    } else {
        println!("  ✗ {regressions} generation regressions, last {last} of {published}");
        Err("frame channel check failed".into())
    }
}
