//! Ordered set of visible roots.

use super::{NodeId, Scene};
use crate::geometry::Point;

/// A root registered in the forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestRoot {
    /// Higher layers draw later and hit-test first.
    pub layer: i32,
    /// Root node.
    pub root: NodeId,
}

/// The visible roots of one frame, in draw order.
///
/// Equal layers keep registration order: a later registration sits on top.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    roots: Vec<ForestRoot>,
}

impl Forest {
    /// Creates an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the roots. Input order is the registration order.
    pub fn rebuild(&mut self, roots: impl IntoIterator<Item = (i32, NodeId)>) {
        self.roots.clear();
        self.roots
            .extend(roots.into_iter().map(|(layer, root)| ForestRoot { layer, root }));
        // Stable: ties keep registration order.
        self.roots.sort_by_key(|r| r.layer);
    }

    /// Number of roots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Returns true if there are no roots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Roots bottom to top.
    pub fn draw_order(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots.iter().map(|r| r.root)
    }

    /// Roots top to bottom.
    pub fn topmost_first(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots.iter().rev().map(|r| r.root)
    }

    /// The topmost root, if any.
    #[must_use]
    pub fn topmost(&self) -> Option<NodeId> {
        self.roots.last().map(|r| r.root)
    }

    /// Returns true if `root` is registered.
    #[must_use]
    pub fn contains_root(&self, root: NodeId) -> bool {
        self.roots.iter().any(|r| r.root == root)
    }

    /// Hit-tests roots topmost first.
    ///
    /// Appends the first non-empty hit path to `out` and returns its root.
    pub fn hit_path(&self, scene: &Scene, point: Point, out: &mut Vec<NodeId>) -> Option<NodeId> {
        self.topmost_first().find(|&root| scene.hit_path(root, point, out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::render::NoSprites;
    use crate::scene::SceneNode;
    use crate::style::Color;
    use crate::widget::WidgetKind;

    #[test]
    fn test_layer_then_registration_order() {
        let mut scene = Scene::new();
        let viewport = Rect::from_size(200.0, 200.0);
        let make = |scene: &mut Scene| {
            let id = scene.create(SceneNode::new(WidgetKind::panel(Color::WHITE)).with_local(Rect::from_size(100.0, 100.0)));
            scene.layout(id, viewport, &NoSprites);
            id
        };
        let hud = make(&mut scene);
        let first = make(&mut scene);
        let second = make(&mut scene);

        let mut forest = Forest::new();
        forest.rebuild([(10, first), (0, hud), (10, second)]);

        assert_eq!(forest.draw_order().collect::<Vec<_>>(), vec![hud, first, second]);
        assert_eq!(forest.topmost(), Some(second));

        let mut path = Vec::new();
        assert_eq!(forest.hit_path(&scene, Point::new(5.0, 5.0), &mut path), Some(second));
        assert_eq!(path, vec![second]);

        scene.get_mut(second).unwrap().visible = false;
        path.clear();
        assert_eq!(forest.hit_path(&scene, Point::new(5.0, 5.0), &mut path), Some(first));
    }
}
