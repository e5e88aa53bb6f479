//! Scene node data.

use std::fmt;

use loom_core::Handle;

use crate::geometry::{Anchors, Point, Rect};
use crate::widget::WidgetKind;

/// Handle to a node in a [`Scene`](super::Scene).
///
/// Handles are generational: once the node is destroyed, every copy of its
/// handle fails liveness checks, even if the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Handle);

impl NodeId {
    /// Null node ID, never live.
    pub const NULL: Self = Self(Handle::NULL);

    /// Wraps an arena handle.
    #[inline]
    #[must_use]
    pub const fn from_handle(handle: Handle) -> Self {
        Self(handle)
    }

    /// Returns the underlying arena handle.
    #[inline]
    #[must_use]
    pub const fn handle(self) -> Handle {
        self.0
    }

    /// Returns true if this is the null ID.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("NodeId(null)")
        } else {
            write!(f, "NodeId({}v{})", self.0.index(), self.0.generation())
        }
    }
}

/// Purely visual offset and scale, applied about the rect center.
///
/// Does not affect layout. Animations drive it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualTransform {
    /// Translation in virtual units.
    pub offset: (f32, f32),
    /// Uniform scale.
    pub scale: f32,
}

impl VisualTransform {
    /// No offset, unit scale.
    pub const IDENTITY: Self = Self {
        offset: (0.0, 0.0),
        scale: 1.0,
    };

    /// Applies the transform to a layout rect.
    #[must_use]
    pub fn apply(&self, rect: Rect) -> Rect {
        let width = rect.width * self.scale;
        let height = rect.height * self.scale;
        let center = rect.center();
        Rect::new(
            center.x - width * 0.5 + self.offset.0,
            center.y - height * 0.5 + self.offset.1,
            width,
            height,
        )
    }
}

impl Default for VisualTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One widget in the scene tree.
///
/// Build with [`SceneNode::new`] and the `with_*` methods, then hand it to
/// [`Scene::create`](super::Scene::create). Tree links and absolute
/// rectangles are owned by the scene.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Identifier, unique within the scene. Empty means anonymous.
    pub name: String,
    /// Widget behavior and state.
    pub kind: WidgetKind,
    /// Parent-relative rectangle.
    pub local: Rect,
    /// Edge anchors against the parent rect.
    pub anchors: Anchors,
    /// Hidden nodes are skipped by hit-testing, drawing and focus.
    pub visible: bool,
    /// The node itself can be a hit target.
    pub hit_test_self: bool,
    /// Children can be hit targets.
    pub hit_test_children: bool,
    /// 0 = document order, >0 = explicit priority (ascending).
    pub tab_index: u32,
    /// Can receive keyboard focus.
    pub focusable: bool,
    /// Hover tooltip text.
    pub tooltip: Option<String>,
    /// Visual transform.
    pub transform: Option<VisualTransform>,
    /// Hit-test against the transformed rect instead of the layout rect.
    pub hit_visual: bool,

    pub(super) rect: Rect,
    pub(super) clip: Rect,
    pub(super) visual_clip: Rect,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl SceneNode {
    /// Creates a detached node with defaults for its kind.
    #[must_use]
    pub fn new(kind: WidgetKind) -> Self {
        let focusable = kind.focusable_by_default();
        let hit_test_self = kind.hit_test_by_default();
        Self {
            name: String::new(),
            kind,
            local: Rect::ZERO,
            anchors: Anchors::NONE,
            visible: true,
            hit_test_self,
            hit_test_children: true,
            tab_index: 0,
            focusable,
            tooltip: None,
            transform: None,
            hit_visual: false,
            rect: Rect::ZERO,
            clip: Rect::ZERO,
            visual_clip: Rect::ZERO,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the parent-relative rectangle.
    #[must_use]
    pub fn with_local(mut self, local: Rect) -> Self {
        self.local = local;
        self
    }

    /// Sets the edge anchors.
    #[must_use]
    pub fn with_anchors(mut self, anchors: Anchors) -> Self {
        self.anchors = anchors;
        self
    }

    /// Sets the tab index.
    #[must_use]
    pub fn with_tab_index(mut self, tab_index: u32) -> Self {
        self.tab_index = tab_index;
        self
    }

    /// Sets focusability.
    #[must_use]
    pub fn with_focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    /// Sets the tooltip text.
    #[must_use]
    pub fn with_tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    /// Sets visibility.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets both hit-test flags.
    #[must_use]
    pub fn with_hit_test(mut self, hit_self: bool, hit_children: bool) -> Self {
        self.hit_test_self = hit_self;
        self.hit_test_children = hit_children;
        self
    }

    /// Sets the visual transform and whether hit-testing follows it.
    #[must_use]
    pub fn with_transform(mut self, transform: VisualTransform, hit_visual: bool) -> Self {
        self.transform = Some(transform);
        self.hit_visual = hit_visual;
        self
    }

    /// Absolute layout rect. Valid after a layout pass.
    #[inline]
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Absolute clip rect (`rect ∩ parent clip`). Valid after a layout pass.
    #[inline]
    #[must_use]
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Rect the node is drawn at: the layout rect with the visual transform.
    #[must_use]
    pub fn visual_rect(&self) -> Rect {
        self.transform.map_or(self.rect, |t| t.apply(self.rect))
    }

    /// Parent node, if attached.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Visual rect clipped by the parent clip. Equals [`SceneNode::clip`]
    /// without a transform.
    #[inline]
    #[must_use]
    pub fn visual_clip(&self) -> Rect {
        self.visual_clip
    }

    /// Point test against this node alone. False when hidden.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> bool {
        let area = if self.hit_visual { self.visual_clip } else { self.clip };
        self.visible && area.contains(point)
    }
}
