//! Keyboard and gamepad focus navigation.
//!
//! Pure functions over a visible subtree. The router owns the focus slot.

use crate::geometry::Point;
use crate::scene::{NodeId, Scene};

/// Directional navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavDirection {
    /// Toward smaller y.
    Up,
    /// Toward larger y.
    Down,
    /// Toward smaller x.
    Left,
    /// Toward larger x.
    Right,
}

// Penalty for leaving the navigation axis.
const OFF_AXIS_WEIGHT: f32 = 0.75;

/// Focusable nodes under `root` in tab order.
///
/// Depth-first over visible nodes. Among siblings, positive `tab_index`
/// values come first in ascending order (stable), then zero in document order.
#[must_use]
pub fn tab_order(scene: &Scene, root: NodeId) -> Vec<NodeId> {
    let mut order = Vec::new();
    collect(scene, root, &mut order);
    order
}

fn collect(scene: &Scene, id: NodeId, out: &mut Vec<NodeId>) {
    let Some(node) = scene.get(id) else {
        return;
    };
    if !node.visible {
        return;
    }
    if node.focusable {
        out.push(id);
    }

    let children = node.children();
    let tab_index = |c: &NodeId| scene.get(*c).map_or(0, |n| n.tab_index);
    if children.iter().any(|c| tab_index(c) > 0) {
        let mut explicit: Vec<NodeId> = children.iter().copied().filter(|c| tab_index(c) > 0).collect();
        explicit.sort_by_key(|c| tab_index(c));
        for child in explicit {
            collect(scene, child, out);
        }
    }
    for &child in children {
        if tab_index(&child) == 0 {
            collect(scene, child, out);
        }
    }
}

/// Next focusable node after `current`, wrapping. `None` current gives the first.
#[must_use]
pub fn next_by_tab(scene: &Scene, root: NodeId, current: Option<NodeId>) -> Option<NodeId> {
    let order = tab_order(scene, root);
    let position = current.and_then(|c| order.iter().position(|&n| n == c));
    match position {
        Some(i) => order.get((i + 1) % order.len()).copied(),
        None => order.first().copied(),
    }
}

/// Previous focusable node before `current`, wrapping. `None` current gives the last.
#[must_use]
pub fn prev_by_tab(scene: &Scene, root: NodeId, current: Option<NodeId>) -> Option<NodeId> {
    let order = tab_order(scene, root);
    let position = current.and_then(|c| order.iter().position(|&n| n == c));
    match position {
        Some(i) => order.get((i + order.len() - 1) % order.len()).copied(),
        None => order.last().copied(),
    }
}

/// Best focus candidate from `from` in `direction`.
///
/// Candidates must have their center strictly in the forward half-plane.
/// Score is `d² × (1 + 0.75 × (1 − |cos θ|))`, lowest wins; exact ties go to
/// the candidate found first in tab order.
#[must_use]
pub fn best_in_direction(scene: &Scene, root: NodeId, from: NodeId, direction: NavDirection) -> Option<NodeId> {
    let origin = scene.get(from)?.rect().center();
    let mut best: Option<(NodeId, f32)> = None;

    for candidate in tab_order(scene, root) {
        if candidate == from {
            continue;
        }
        let Some(node) = scene.get(candidate) else {
            continue;
        };
        let Some(score) = score(origin, node.rect().center(), direction) else {
            continue;
        };
        if best.map_or(true, |(_, s)| score < s) {
            best = Some((candidate, score));
        }
    }
    best.map(|(id, _)| id)
}

fn score(origin: Point, target: Point, direction: NavDirection) -> Option<f32> {
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let along = match direction {
        NavDirection::Right => dx,
        NavDirection::Left => -dx,
        NavDirection::Down => dy,
        NavDirection::Up => -dy,
    };
    if along <= 0.0 {
        return None;
    }
    let d2 = dx * dx + dy * dy;
    let cos = along / d2.sqrt();
    Some(d2 * (1.0 + OFF_AXIS_WEIGHT * (1.0 - cos.abs())))
}
