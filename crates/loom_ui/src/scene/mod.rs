//! # Scene Graph
//!
//! Widgets live in a generational arena and reference each other by
//! [`NodeId`]. A parent owns its children: destroying it destroys the whole
//! subtree and turns every outstanding handle into it stale.
//!
//! ```text
//! Scene (arena)
//!   ├── root "hud"       ← registered in the Forest at layer 0
//!   │     └── Button "build"
//!   └── root "inventory" ← registered at layer 10, drawn on top
//!         ├── DragSource "slot_0"
//!         └── DropTarget "trash"
//! ```

mod forest;
mod node;

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use loom_core::SlotArena;

use crate::error::{UiError, UiResult};
use crate::geometry::{Layout, Point, Rect};
use crate::render::{DrawList, SpriteLookup};
use crate::style::Theme;
use crate::widget::{self, WidgetKind};

pub use forest::{Forest, ForestRoot};
pub use node::{NodeId, SceneNode, VisualTransform};

/// How a node places its children during layout.
enum ChildPlacement {
    /// Each child resolves its anchors against this rect.
    Anchored(Rect),
    /// Children are arranged linearly inside the node rect.
    Stacked(Layout),
}

/// Arena of scene nodes plus the identifier registry.
pub struct Scene {
    nodes: SlotArena<SceneNode>,
    names: HashMap<String, NodeId>,
    // Layout scratch, shared by nested stacks (each level truncates back to its base).
    scratch_sizes: Vec<(f32, f32)>,
    scratch_rects: Vec<Rect>,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates an empty scene with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity),
            names: HashMap::with_capacity(capacity),
            scratch_sizes: Vec::with_capacity(32),
            scratch_rects: Vec::with_capacity(32),
        }
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the scene holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Adds a detached node.
    ///
    /// A non-empty name already held by a live node is not registered again;
    /// the first registration keeps it.
    pub fn create(&mut self, mut node: SceneNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        let name = node.name.clone();
        let id = NodeId::from_handle(self.nodes.insert(node));

        if !name.is_empty() {
            match self.names.entry(name) {
                Entry::Occupied(mut entry) => {
                    if self.nodes.contains(entry.get().handle()) {
                        tracing::warn!(
                            name = entry.key().as_str(),
                            kept = ?entry.get(),
                            ignored = ?id,
                            "duplicate node identifier"
                        );
                    } else {
                        entry.insert(id);
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(id);
                }
            }
        }
        id
    }

    /// Appends a detached node to `parent`'s children.
    ///
    /// # Errors
    ///
    /// [`UiError::StaleNode`] if either handle is dead,
    /// [`UiError::AlreadyAttached`] if `child` has a parent,
    /// [`UiError::WouldCreateCycle`] if `parent` lies inside `child`'s subtree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> UiResult<()> {
        self.check_live(parent)?;
        let child_node = self.nodes.get(child.handle()).ok_or(UiError::StaleNode(child))?;
        if child_node.parent.is_some() {
            return Err(UiError::AlreadyAttached(child));
        }
        if self.is_in_subtree(parent, child) {
            return Err(UiError::WouldCreateCycle { child, parent });
        }
        self.link(parent, child);
        Ok(())
    }

    /// Detaches a node from its parent. The subtree stays alive.
    ///
    /// # Errors
    ///
    /// [`UiError::StaleNode`] if the handle is dead.
    pub fn detach(&mut self, node: NodeId) -> UiResult<()> {
        let parent = self
            .nodes
            .get_mut(node.handle())
            .ok_or(UiError::StaleNode(node))?
            .parent
            .take();
        if let Some(parent) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent.handle()) {
                parent_node.children.retain(|&c| c != node);
            }
        }
        Ok(())
    }

    /// Moves a node (and its subtree) under a new parent. Identity is preserved.
    ///
    /// # Errors
    ///
    /// [`UiError::StaleNode`] if either handle is dead,
    /// [`UiError::WouldCreateCycle`] if `new_parent` lies inside `node`'s subtree.
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) -> UiResult<()> {
        self.check_live(node)?;
        self.check_live(new_parent)?;
        if self.is_in_subtree(new_parent, node) {
            tracing::warn!(?node, ?new_parent, "rejected reparent: would create a cycle");
            return Err(UiError::WouldCreateCycle {
                child: node,
                parent: new_parent,
            });
        }
        self.detach(node)?;
        self.link(new_parent, node);
        Ok(())
    }

    /// Destroys a node and its whole subtree.
    ///
    /// Returns the number of nodes released.
    ///
    /// # Errors
    ///
    /// [`UiError::StaleNode`] if the handle is dead.
    pub fn destroy(&mut self, node: NodeId) -> UiResult<usize> {
        self.detach(node)?;

        let mut released = 0;
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            let Some(removed) = self.nodes.remove(id.handle()) else {
                continue;
            };
            if !removed.name.is_empty() && self.names.get(&removed.name) == Some(&id) {
                self.names.remove(&removed.name);
            }
            pending.extend_from_slice(&removed.children);
            released += 1;
        }
        tracing::debug!(?node, released, "destroyed subtree");
        Ok(released)
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(child_node) = self.nodes.get_mut(child.handle()) {
            child_node.parent = Some(parent);
        }
        if let Some(parent_node) = self.nodes.get_mut(parent.handle()) {
            parent_node.children.push(child);
        }
    }

    fn check_live(&self, node: NodeId) -> UiResult<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(UiError::StaleNode(node))
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns true if the handle refers to a live node.
    #[inline]
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(node.handle())
    }

    /// Returns the node, if live.
    #[inline]
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&SceneNode> {
        self.nodes.get(node.handle())
    }

    /// Returns the node mutably, if live.
    ///
    /// Tree links are not reachable through this reference; use the
    /// structural operations to change them.
    #[inline]
    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(node.handle())
    }

    /// Looks up a node by identifier.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied().filter(|&id| self.contains(id))
    }

    /// Parent of a live, attached node.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|n| n.parent)
    }

    /// Children of a node; empty for stale handles.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map_or(&[], |n| n.children.as_slice())
    }

    /// Topmost ancestor of a live node (the node itself when detached).
    #[must_use]
    pub fn root_of(&self, node: NodeId) -> Option<NodeId> {
        let mut current = node;
        let mut n = self.get(current)?;
        while let Some(parent) = n.parent {
            current = parent;
            n = self.get(current)?;
        }
        Some(current)
    }

    /// Root of a node whose whole ancestor chain is visible, or `None`.
    #[must_use]
    pub fn visible_root(&self, node: NodeId) -> Option<NodeId> {
        let mut current = node;
        loop {
            let n = self.get(current)?;
            if !n.visible {
                return None;
            }
            match n.parent {
                Some(parent) => current = parent,
                None => return Some(current),
            }
        }
    }

    /// Returns true if `node` is `root` or one of its descendants.
    #[must_use]
    pub fn is_in_subtree(&self, node: NodeId, root: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == root {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Appends the ancestor chain of `node` to `out`, root first, node last.
    pub fn path_to(&self, node: NodeId, out: &mut Vec<NodeId>) {
        let base = out.len();
        let mut current = Some(node);
        while let Some(id) = current {
            if !self.contains(id) {
                break;
            }
            out.push(id);
            current = self.parent(id);
        }
        out[base..].reverse();
    }

    /// Iterates every live node.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().map(|(h, n)| (NodeId::from_handle(h), n))
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Lays out a root and its subtree inside the viewport.
    ///
    /// Roots resolve their anchors against the viewport and clip to it.
    pub fn layout(&mut self, root: NodeId, viewport: Rect, sprites: &dyn SpriteLookup) {
        self.layout_node(root, viewport, viewport, None, sprites);
    }

    /// Lays out a subtree inside an explicit parent rect and clip.
    pub fn layout_within(
        &mut self,
        node: NodeId,
        parent_rect: Rect,
        parent_clip: Rect,
        sprites: &dyn SpriteLookup,
    ) {
        self.layout_node(node, parent_rect, parent_clip, None, sprites);
    }

    fn layout_node(
        &mut self,
        id: NodeId,
        parent_rect: Rect,
        parent_clip: Rect,
        placed: Option<Rect>,
        sprites: &dyn SpriteLookup,
    ) {
        let Some(node) = self.nodes.get_mut(id.handle()) else {
            return;
        };

        let mut local = node.local;
        if let WidgetKind::Image { sprite, .. } = &node.kind {
            if local.width <= 0.0 || local.height <= 0.0 {
                if let Some(info) = sprites.sprite(sprite) {
                    if local.width <= 0.0 {
                        local.width = info.size.0;
                    }
                    if local.height <= 0.0 {
                        local.height = info.size.1;
                    }
                }
            }
        }

        let rect = placed.unwrap_or_else(|| node.anchors.resolve(local, parent_rect));
        let clip = rect.clip_to(&parent_clip);
        node.rect = rect;
        node.clip = clip;
        node.visual_clip = match node.transform {
            Some(transform) => transform.apply(rect).clip_to(&parent_clip),
            None => clip,
        };

        let child_count = node.children.len();
        let placement = match &mut node.kind {
            WidgetKind::Stack { layout } => ChildPlacement::Stacked(layout.clone()),
            WidgetKind::ScrollView { offset, content_height, .. } => {
                let max_offset = (*content_height - rect.height).max(0.0);
                *offset = offset.clamp(0.0, max_offset);
                ChildPlacement::Anchored(rect.translate(0.0, -*offset))
            }
            _ => ChildPlacement::Anchored(rect),
        };

        match placement {
            ChildPlacement::Anchored(content) => {
                for i in 0..child_count {
                    if let Some(child) = self.child_at(id, i) {
                        self.layout_node(child, content, clip, None, sprites);
                    }
                }
            }
            ChildPlacement::Stacked(layout) => {
                let size_base = self.scratch_sizes.len();
                let rect_base = self.scratch_rects.len();
                for i in 0..child_count {
                    let size = self
                        .child_at(id, i)
                        .and_then(|child| self.nodes.get(child.handle()))
                        .map_or((0.0, 0.0), |c| (c.local.width, c.local.height));
                    self.scratch_sizes.push(size);
                }
                layout.arrange_into(rect, &self.scratch_sizes[size_base..], &mut self.scratch_rects);
                for i in 0..child_count {
                    let slot = self.scratch_rects[rect_base + i];
                    if let Some(child) = self.child_at(id, i) {
                        self.layout_node(child, rect, clip, Some(slot), sprites);
                    }
                }
                self.scratch_sizes.truncate(size_base);
                self.scratch_rects.truncate(rect_base);
            }
        }

        self.record_content_extent(id);
    }

    /// Records how far a scroll view's children extend below its content origin.
    fn record_content_extent(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id.handle()) else {
            return;
        };
        let WidgetKind::ScrollView { offset, .. } = node.kind else {
            return;
        };
        let origin = node.rect.y - offset;
        let extent = node
            .children
            .iter()
            .filter_map(|&c| self.nodes.get(c.handle()))
            .filter(|c| c.visible)
            .map(|c| c.rect.bottom() - origin)
            .fold(0.0_f32, f32::max);

        if let Some(WidgetKind::ScrollView { content_height, .. }) =
            self.nodes.get_mut(id.handle()).map(|n| &mut n.kind)
        {
            *content_height = extent;
        }
    }

    fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.nodes
            .get(parent.handle())
            .and_then(|n| n.children.get(index).copied())
    }

    // =========================================================================
    // Hit testing
    // =========================================================================

    /// Point test against a single node.
    #[must_use]
    pub fn hit_test(&self, node: NodeId, point: Point) -> bool {
        self.get(node).is_some_and(|n| n.hit_test(point))
    }

    /// Finds the deepest node under `point` in `root`'s subtree.
    ///
    /// On a hit, appends the path (root first, target last) to `out` and
    /// returns true. Later children are on top of earlier ones. Nodes with
    /// `hit_test_self == false` can still be ancestors on the path.
    pub fn hit_path(&self, root: NodeId, point: Point, out: &mut Vec<NodeId>) -> bool {
        let base = out.len();
        if self.hit_path_inner(root, point, out) {
            true
        } else {
            out.truncate(base);
            false
        }
    }

    fn hit_path_inner(&self, id: NodeId, point: Point, out: &mut Vec<NodeId>) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        if !node.visible {
            return false;
        }

        out.push(id);
        if node.hit_test_children {
            for &child in node.children.iter().rev() {
                if self.hit_path_inner(child, point, out) {
                    return true;
                }
            }
        }
        if node.hit_test_self && node.hit_test(point) {
            return true;
        }
        out.pop();
        false
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Draws a subtree depth-first.
    ///
    /// Hidden nodes and nodes clipped to nothing are skipped with their
    /// subtrees.
    pub fn draw(&self, root: NodeId, sprites: &dyn SpriteLookup, theme: &Theme, list: &mut DrawList) {
        let Some(node) = self.get(root) else {
            return;
        };
        if !node.visible || node.clip.is_empty() {
            return;
        }
        widget::draw(node, sprites, theme, list);
        for &child in &node.children {
            self.draw(child, sprites, theme, list);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("nodes", &self.nodes.len())
            .field("names", &self.names.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Anchors;
    use crate::render::{NoSprites, SpriteInfo, SpriteRegion};
    use crate::style::Color;

    fn panel(scene: &mut Scene, name: &str, local: Rect) -> NodeId {
        scene.create(SceneNode::new(WidgetKind::panel(Color::WHITE)).with_name(name).with_local(local))
    }

    #[test]
    fn test_append_and_detach() {
        let mut scene = Scene::new();
        let root = panel(&mut scene, "root", Rect::from_size(100.0, 100.0));
        let child = panel(&mut scene, "child", Rect::from_size(10.0, 10.0));

        scene.append_child(root, child).unwrap();
        assert_eq!(scene.parent(child), Some(root));
        assert_eq!(scene.children(root), &[child]);
        assert_eq!(scene.append_child(root, child), Err(UiError::AlreadyAttached(child)));

        scene.detach(child).unwrap();
        assert!(scene.children(root).is_empty());
        assert_eq!(scene.root_of(child), Some(child));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut scene = Scene::new();
        let a = panel(&mut scene, "a", Rect::ZERO);
        let b = panel(&mut scene, "b", Rect::ZERO);
        scene.append_child(a, b).unwrap();

        assert!(matches!(scene.reparent(a, b), Err(UiError::WouldCreateCycle { .. })));
        assert!(matches!(scene.append_child(a, a), Err(UiError::WouldCreateCycle { .. })));
        assert_eq!(scene.parent(b), Some(a));
    }

    #[test]
    fn test_destroy_is_recursive() {
        let mut scene = Scene::new();
        let root = panel(&mut scene, "root", Rect::ZERO);
        let mid = panel(&mut scene, "mid", Rect::ZERO);
        let leaf = panel(&mut scene, "leaf", Rect::ZERO);
        scene.append_child(root, mid).unwrap();
        scene.append_child(mid, leaf).unwrap();

        assert_eq!(scene.destroy(mid).unwrap(), 2);
        assert!(!scene.contains(mid));
        assert!(!scene.contains(leaf));
        assert!(scene.children(root).is_empty());
        assert_eq!(scene.find_by_name("leaf"), None);
        assert_eq!(scene.destroy(mid), Err(UiError::StaleNode(mid)));
    }

    #[test]
    fn test_duplicate_name_first_wins() {
        let mut scene = Scene::new();
        let first = panel(&mut scene, "dup", Rect::ZERO);
        let _second = panel(&mut scene, "dup", Rect::ZERO);

        assert_eq!(scene.find_by_name("dup"), Some(first));

        scene.destroy(first).unwrap();
        assert_eq!(scene.find_by_name("dup"), None);
        let third = panel(&mut scene, "dup", Rect::ZERO);
        assert_eq!(scene.find_by_name("dup"), Some(third));
    }

    #[test]
    fn test_layout_clips_to_parent() {
        let mut scene = Scene::new();
        let root = panel(&mut scene, "root", Rect::new(10.0, 10.0, 100.0, 100.0));
        let child = panel(&mut scene, "child", Rect::new(80.0, 80.0, 50.0, 50.0));
        let outside = panel(&mut scene, "outside", Rect::new(500.0, 0.0, 10.0, 10.0));
        scene.append_child(root, child).unwrap();
        scene.append_child(root, outside).unwrap();

        scene.layout(root, Rect::from_size(1920.0, 1080.0), &NoSprites);

        let child = scene.get(child).unwrap();
        assert_eq!(child.rect(), Rect::new(90.0, 90.0, 50.0, 50.0));
        assert_eq!(child.clip(), Rect::new(90.0, 90.0, 20.0, 20.0));

        let outside = scene.get(outside).unwrap();
        assert!(outside.clip().is_empty());
        assert_eq!(outside.clip().x, 510.0);
    }

    #[test]
    fn test_layout_anchors_and_stack() {
        let mut scene = Scene::new();
        let root = scene.create(
            SceneNode::new(WidgetKind::Stack {
                layout: Layout::vertical().with_gap(10.0),
            })
            .with_anchors(Anchors::fill(20.0)),
        );
        let a = panel(&mut scene, "a", Rect::from_size(50.0, 30.0));
        let b = panel(&mut scene, "b", Rect::from_size(50.0, 30.0));
        scene.append_child(root, a).unwrap();
        scene.append_child(root, b).unwrap();

        scene.layout(root, Rect::from_size(400.0, 300.0), &NoSprites);

        assert_eq!(scene.get(root).unwrap().rect(), Rect::new(20.0, 20.0, 360.0, 260.0));
        assert_eq!(scene.get(a).unwrap().rect(), Rect::new(20.0, 20.0, 50.0, 30.0));
        assert_eq!(scene.get(b).unwrap().rect(), Rect::new(20.0, 60.0, 50.0, 30.0));
    }

    #[test]
    fn test_image_takes_sprite_size() {
        let mut sprites = HashMap::new();
        sprites.insert(
            "icon".to_owned(),
            SpriteInfo {
                size: (24.0, 16.0),
                region: SpriteRegion::SOLID,
            },
        );

        let mut scene = Scene::new();
        let image = scene.create(SceneNode::new(WidgetKind::image("icon")).with_local(Rect::new(5.0, 5.0, 0.0, 0.0)));
        scene.layout(image, Rect::from_size(100.0, 100.0), &sprites);

        assert_eq!(scene.get(image).unwrap().rect(), Rect::new(5.0, 5.0, 24.0, 16.0));
    }

    #[test]
    fn test_scroll_view_offsets_children() {
        let mut scene = Scene::new();
        let view = scene.create(SceneNode::new(WidgetKind::scroll_view(20.0)).with_local(Rect::from_size(100.0, 100.0)));
        let item = panel(&mut scene, "item", Rect::new(0.0, 150.0, 100.0, 50.0));
        scene.append_child(view, item).unwrap();

        scene.layout(view, Rect::from_size(500.0, 500.0), &NoSprites);
        assert!(matches!(
            scene.get(view).unwrap().kind,
            WidgetKind::ScrollView { content_height, .. } if content_height == 200.0
        ));

        if let Some(WidgetKind::ScrollView { offset, .. }) = scene.get_mut(view).map(|n| &mut n.kind) {
            *offset = 500.0;
        }
        scene.layout(view, Rect::from_size(500.0, 500.0), &NoSprites);

        // Clamped to content height minus view height.
        assert_eq!(scene.get(item).unwrap().rect().y, 50.0);
    }

    #[test]
    fn test_hit_path_topmost_child() {
        let mut scene = Scene::new();
        let root = panel(&mut scene, "root", Rect::from_size(100.0, 100.0));
        let under = panel(&mut scene, "under", Rect::from_size(50.0, 50.0));
        let over = panel(&mut scene, "over", Rect::from_size(50.0, 50.0));
        let ghost = scene.create(
            SceneNode::new(WidgetKind::panel(Color::WHITE))
                .with_local(Rect::from_size(50.0, 50.0))
                .with_hit_test(false, false),
        );
        scene.append_child(root, under).unwrap();
        scene.append_child(root, over).unwrap();
        scene.append_child(root, ghost).unwrap();
        scene.layout(root, Rect::from_size(1920.0, 1080.0), &NoSprites);

        let mut path = Vec::new();
        assert!(scene.hit_path(root, Point::new(10.0, 10.0), &mut path));
        assert_eq!(path, vec![root, over]);

        path.clear();
        assert!(scene.hit_path(root, Point::new(80.0, 80.0), &mut path));
        assert_eq!(path, vec![root]);

        path.clear();
        assert!(!scene.hit_path(root, Point::new(180.0, 80.0), &mut path));
        assert!(path.is_empty());
    }

    #[test]
    fn test_hit_path_stops_at_opaque_group() {
        let mut scene = Scene::new();
        let root = panel(&mut scene, "root", Rect::from_size(100.0, 100.0));
        let group = scene.create(
            SceneNode::new(WidgetKind::panel(Color::WHITE))
                .with_local(Rect::from_size(60.0, 60.0))
                .with_hit_test(true, false),
        );
        let inner = panel(&mut scene, "inner", Rect::new(10.0, 10.0, 20.0, 20.0));
        scene.append_child(root, group).unwrap();
        scene.append_child(group, inner).unwrap();
        scene.layout(root, Rect::from_size(1920.0, 1080.0), &NoSprites);

        let mut path = Vec::new();
        assert!(scene.hit_path(root, Point::new(15.0, 15.0), &mut path));
        assert_eq!(path, vec![root, group]);
        assert!(!path.contains(&inner));
    }

    #[test]
    fn test_hit_visual_rect() {
        let mut scene = Scene::new();
        let node = scene.create(
            SceneNode::new(WidgetKind::panel(Color::WHITE))
                .with_local(Rect::from_size(100.0, 100.0))
                .with_transform(
                    VisualTransform {
                        offset: (200.0, 0.0),
                        scale: 1.0,
                    },
                    true,
                ),
        );
        scene.layout(node, Rect::from_size(1920.0, 1080.0), &NoSprites);

        assert!(!scene.hit_test(node, Point::new(50.0, 50.0)));
        assert!(scene.hit_test(node, Point::new(250.0, 50.0)));
    }

    #[test]
    fn test_path_to_root_first() {
        let mut scene = Scene::new();
        let a = panel(&mut scene, "a", Rect::ZERO);
        let b = panel(&mut scene, "b", Rect::ZERO);
        let c = panel(&mut scene, "c", Rect::ZERO);
        scene.append_child(a, b).unwrap();
        scene.append_child(b, c).unwrap();

        let mut path = Vec::new();
        scene.path_to(c, &mut path);
        assert_eq!(path, vec![a, b, c]);
        assert!(scene.is_in_subtree(c, a));
        assert!(!scene.is_in_subtree(a, c));
    }
}
