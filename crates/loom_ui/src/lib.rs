//! # LOOM UI Core
//!
//! Retained scene, immediate-style draw lists. Built for a game's HUD where
//! one thread routes input and another presents frames:
//! - Capture → target → bubble routing with pointer capture
//! - Keyboard and gamepad focus navigation
//! - Drag and drop with typed payloads
//! - A modal layer that owns the pointer while a popup is open
//! - Frame handoff over a lock-free triple buffer
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      UPDATE THREAD                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  InputEvent → Router ─┬─ DragController                      │
//! │                       ├─ ModalLayer                          │
//! │                       └─ focus::*                            │
//! │                 ↓                                            │
//! │        widget::handle_event → Requests → Router              │
//! │                 ↓                                            │
//! │   Scene::layout → Scene::draw → DrawList → FrameProducer     │
//! └──────────────────────────────────────────────────────────────┘
//!                               │ publish()
//! ┌──────────────────────────────────────────────────────────────┐
//! │  RENDER THREAD: FrameConsumer::acquire_front() → GPU upload  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stale Handles
//!
//! Nodes are addressed by generational [`NodeId`]s. A destroyed node's ID
//! stops resolving; the router drops such IDs from its slots before every
//! event instead of reporting them.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod drag;
pub mod error;
pub mod event;
pub mod focus;
pub mod geometry;
pub mod modal;
pub mod render;
pub mod router;
pub mod runtime;
pub mod scene;
pub mod signal;
pub mod style;
pub mod widget;

pub use config::UiConfig;
pub use drag::{DragController, DragPayload, DragVisual, PayloadKind};
pub use error::{UiError, UiResult};
pub use event::{CloseReason, DragPhase, InputEvent, Key, Modifiers, MouseButton, Phase, UiEvent};
pub use geometry::{Point, Rect};
pub use modal::ModalLayer;
pub use render::{DrawList, Quad, SpriteInfo, SpriteLookup};
pub use router::Router;
pub use runtime::{TickStats, UiRuntime};
pub use scene::{Forest, NodeId, Scene, SceneNode};
pub use signal::{Signal, SignalBus, SignalValue};
pub use style::{Color, Theme};
pub use widget::WidgetKind;
