//! # UI Runtime
//!
//! Owns everything that lives on the update thread and drives one frame per
//! [`UiRuntime::tick`]:
//!
//! ```text
//! Frame N (update thread):
//! ┌──────────────────────────────────────────────────────────────┐
//! │ 1. Rebuild forest if the view registry changed               │
//! │ 2. Lay out if the scene was touched                          │
//! │ 3. Drain input queue → Router::route (one event at a time)   │
//! │ 4. Advance tooltip timers                                    │
//! │ 5. If invalidated:                                           │
//! │    ├─ lay out views and popup                                │
//! │    ├─ fill the producer's draw list                          │
//! │    │    views by layer → popup → focus ring → drag → tooltip │
//! │    └─ publish                                                │
//! └──────────────────────────────────────────────────────────────┘
//!                                   │
//!                       FrameConsumer<DrawList> (render thread)
//! ```

use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender};
use loom_core::{frame_channel, FrameConsumer, FrameProducer};

use crate::config::UiConfig;
use crate::error::{UiError, UiResult};
use crate::event::{CloseReason, InputEvent};
use crate::geometry::Rect;
use crate::render::{DrawList, SpriteLookup};
use crate::router::Router;
use crate::scene::{Forest, NodeId, Scene};
use crate::signal::SignalBus;
use crate::style::Theme;

/// Subscriber queue depth of the runtime's signal bus.
const SIGNAL_CAPACITY: usize = 64;

/// A registered top-level view.
#[derive(Debug, Clone)]
struct View {
    name: String,
    root: NodeId,
    layer: i32,
    visible: bool,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Frame counter after the tick.
    pub frame: u64,
    /// Input events routed.
    pub events_routed: u32,
    /// Routed events a widget consumed.
    pub events_consumed: u32,
    /// A new draw list was published.
    pub published: bool,
    /// Quads in the published draw list.
    pub quads: usize,
}

/// Update-thread owner of the scene, router and frame producer.
pub struct UiRuntime {
    config: UiConfig,
    scene: Scene,
    views: Vec<View>,
    forest: Forest,
    forest_dirty: bool,
    layout_dirty: bool,
    router: Router,
    frames: FrameProducer<DrawList>,
    sprites: Box<dyn SpriteLookup + Send>,
    theme: Theme,
    signals: Arc<SignalBus>,
    input_tx: Sender<InputEvent>,
    input_rx: Receiver<InputEvent>,
    frame: u64,
}

impl UiRuntime {
    /// Creates a runtime and the consumer half of its frame channel.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] if `config` fails validation.
    pub fn new(
        config: UiConfig,
        sprites: impl SpriteLookup + Send + 'static,
    ) -> UiResult<(Self, FrameConsumer<DrawList>)> {
        config.validate()?;

        let reserve = config.frame.reserve_quads;
        let (frames, consumer) = frame_channel(|| DrawList::with_capacity(reserve));
        let (input_tx, input_rx) = bounded(config.frame.input_capacity);
        let signals = Arc::new(SignalBus::new(SIGNAL_CAPACITY));
        let mut router = Router::new(&config);
        router.set_signal_bus(Arc::clone(&signals));

        let runtime = Self {
            config,
            scene: Scene::with_capacity(256),
            views: Vec::new(),
            forest: Forest::new(),
            forest_dirty: false,
            layout_dirty: true,
            router,
            frames,
            sprites: Box::new(sprites),
            theme: Theme::DARK,
            signals,
            input_tx,
            input_rx,
            frame: 0,
        };
        Ok((runtime, consumer))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene, for building or editing widgets. Marks layout dirty.
    pub fn scene_mut(&mut self) -> &mut Scene {
        self.layout_dirty = true;
        self.forest_dirty = true;
        self.router.invalidate();
        &mut self.scene
    }

    /// The router.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// The forest as of the last rebuild.
    #[must_use]
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Bus widgets publish on.
    #[must_use]
    pub fn signals(&self) -> Arc<SignalBus> {
        Arc::clone(&self.signals)
    }

    /// Sender half of the input queue. Cloneable and `Send`.
    #[must_use]
    pub fn input_sender(&self) -> Sender<InputEvent> {
        self.input_tx.clone()
    }

    /// Frames published so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Replaces the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.router.invalidate();
    }

    /// Resizes the viewport.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.config.viewport.width = width;
        self.config.viewport.height = height;
        self.router.set_viewport(Rect::from_size(width, height));
        self.layout_dirty = true;
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Registers `root` as a top-level view on `layer`.
    ///
    /// A name already in use keeps its first registration.
    ///
    /// # Errors
    ///
    /// [`UiError::StaleNode`] for a dead root, [`UiError::AlreadyAttached`]
    /// if `root` has a parent.
    pub fn add_view(&mut self, name: impl Into<String>, root: NodeId, layer: i32) -> UiResult<()> {
        let name = name.into();
        let node = self.scene.get(root).ok_or(UiError::StaleNode(root))?;
        if node.parent().is_some() {
            return Err(UiError::AlreadyAttached(root));
        }
        if self.views.iter().any(|v| v.name == name) {
            tracing::warn!(%name, "duplicate view name, keeping the first");
            return Ok(());
        }

        tracing::debug!(%name, ?root, layer, "view added");
        self.views.push(View {
            name,
            root,
            layer,
            visible: true,
        });
        self.forest_dirty = true;
        self.layout_dirty = true;
        Ok(())
    }

    /// Shows or hides a view. Returns false for an unknown name.
    pub fn set_view_visible(&mut self, name: &str, visible: bool) -> bool {
        let Some(view) = self.views.iter_mut().find(|v| v.name == name) else {
            return false;
        };
        if view.visible != visible {
            view.visible = visible;
            self.forest_dirty = true;
            self.router.invalidate();
        }
        true
    }

    /// Unregisters a view and returns its root. The subtree stays in the scene.
    pub fn remove_view(&mut self, name: &str) -> Option<NodeId> {
        let index = self.views.iter().position(|v| v.name == name)?;
        let view = self.views.remove(index);
        tracing::debug!(name, root = ?view.root, "view removed");
        self.forest_dirty = true;
        self.router.invalidate();
        Some(view.root)
    }

    /// Root of a registered view.
    #[must_use]
    pub fn view_root(&self, name: &str) -> Option<NodeId> {
        self.views.iter().find(|v| v.name == name).map(|v| v.root)
    }

    fn rebuild_forest(&mut self) {
        let scene = &self.scene;
        self.views.retain(|v| {
            let alive = scene.contains(v.root);
            if !alive {
                tracing::warn!(name = %v.name, "view root destroyed, view dropped");
            }
            alive
        });
        self.forest.rebuild(
            self.views
                .iter()
                .filter(|v| v.visible)
                .map(|v| (v.layer, v.root)),
        );
        self.forest_dirty = false;
    }

    fn layout(&mut self) {
        let viewport = self.config.viewport_rect();
        for root in self.forest.draw_order() {
            self.scene.layout(root, viewport, &*self.sprites);
        }
        self.router.modal().layout(&mut self.scene, &*self.sprites);
        self.layout_dirty = false;
    }

    // =========================================================================
    // Modal
    // =========================================================================

    /// Opens `popup` as the modal popup anchored to `anchor`.
    ///
    /// # Errors
    ///
    /// As [`Router::open_modal`].
    pub fn open_modal(&mut self, popup: NodeId, anchor: Rect) -> UiResult<()> {
        self.router.open_modal(&mut self.scene, popup, anchor, &*self.sprites)
    }

    /// Closes the modal popup. Returns false if none was open.
    pub fn close_modal(&mut self, reason: CloseReason) -> bool {
        self.router.close_modal(&mut self.scene, reason, true)
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Routes one event immediately, bypassing the queue.
    pub fn route(&mut self, event: InputEvent) -> bool {
        self.prepare();
        self.router.route(&mut self.scene, &self.forest, event)
    }

    fn prepare(&mut self) {
        if self.forest_dirty {
            self.rebuild_forest();
        }
        if self.layout_dirty {
            self.layout();
        }
    }

    /// Runs one frame: drain input, route, update timers, and publish a new
    /// draw list if anything changed.
    pub fn tick(&mut self, dt: f32) -> TickStats {
        self.prepare();

        let mut stats = TickStats::default();
        while let Ok(event) = self.input_rx.try_recv() {
            stats.events_routed += 1;
            if self.router.route(&mut self.scene, &self.forest, event) {
                stats.events_consumed += 1;
            }
        }
        self.router.update(dt);

        if self.router.take_invalidated() {
            stats.quads = self.publish_frame();
            stats.published = true;
        }
        stats.frame = self.frame;
        stats
    }

    fn publish_frame(&mut self) -> usize {
        if self.forest_dirty {
            self.rebuild_forest();
        }
        self.layout();
        self.frame += 1;

        let list = self.frames.write_buffer();
        list.reset(self.frame);
        for root in self.forest.draw_order() {
            self.scene.draw(root, &*self.sprites, &self.theme, list);
        }
        self.router
            .draw_overlays(&self.scene, &*self.sprites, &self.theme, list);
        let quads = list.quads().len();

        self.frames.publish();
        tracing::trace!(frame = self.frame, quads, "frame published");
        quads
    }
}

impl std::fmt::Debug for UiRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiRuntime")
            .field("views", &self.views)
            .field("forest", &self.forest)
            .field("router", &self.router)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}
