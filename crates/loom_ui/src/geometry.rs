//! Geometry primitives and linear layout.
//!
//! All rectangles are in virtual (viewport) units with the origin at the top
//! left. After a layout pass, node rectangles are absolute.

/// A point in virtual coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point.
    #[must_use]
    pub fn distance_sq(self, other: Self) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle at the origin with the given size.
    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns true if the rectangle has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns true if the point is inside the rectangle (right/bottom exclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Returns true if two rectangles intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns the intersection of two rectangles, or None if they don't intersect.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Self::new(x, y, right - x, bottom - y))
    }

    /// Intersection, collapsing to a zero-size rect at this rect's origin when disjoint.
    #[must_use]
    pub fn clip_to(&self, other: &Self) -> Self {
        self.intersection(other)
            .unwrap_or(Self::new(self.x, self.y, 0.0, 0.0))
    }

    /// Returns the same rect moved by the given offset.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Expands the rectangle by the given amount on all sides.
    #[must_use]
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Shrinks the rectangle by the given amount on all sides.
    #[must_use]
    pub fn shrink(&self, amount: f32) -> Self {
        self.expand(-amount)
    }

    /// Moves this rect so it lies inside `bounds` where possible.
    ///
    /// A rect larger than `bounds` is pinned to the bounds' top-left corner.
    #[must_use]
    pub fn clamp_inside(&self, bounds: &Self) -> Self {
        let x = self.x.min(bounds.right() - self.width).max(bounds.x);
        let y = self.y.min(bounds.bottom() - self.height).max(bounds.y);
        Self::new(x, y, self.width, self.height)
    }
}

/// Per-edge anchor offsets relative to the parent rectangle.
///
/// Each pinned edge sits at the given distance inside the matching parent
/// edge. Pinning both opposing edges derives the size from the parent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Anchors {
    /// Distance from the parent's left edge.
    pub left: Option<f32>,
    /// Distance from the parent's top edge.
    pub top: Option<f32>,
    /// Distance from the parent's right edge.
    pub right: Option<f32>,
    /// Distance from the parent's bottom edge.
    pub bottom: Option<f32>,
}

impl Anchors {
    /// No pinned edges: the local rect is an offset from the parent origin.
    pub const NONE: Self = Self {
        left: None,
        top: None,
        right: None,
        bottom: None,
    };

    /// All four edges pinned at the same inset.
    #[must_use]
    pub const fn fill(inset: f32) -> Self {
        Self {
            left: Some(inset),
            top: Some(inset),
            right: Some(inset),
            bottom: Some(inset),
        }
    }

    /// Resolves an absolute rect from a local rect inside `parent`.
    #[must_use]
    pub fn resolve(&self, local: Rect, parent: Rect) -> Rect {
        let (x, width) = resolve_axis(
            self.left,
            self.right,
            local.x,
            local.width,
            parent.x,
            parent.width,
        );
        let (y, height) = resolve_axis(
            self.top,
            self.bottom,
            local.y,
            local.height,
            parent.y,
            parent.height,
        );
        Rect::new(x, y, width, height)
    }
}

fn resolve_axis(
    near: Option<f32>,
    far: Option<f32>,
    local_pos: f32,
    local_size: f32,
    parent_pos: f32,
    parent_size: f32,
) -> (f32, f32) {
    match (near, far) {
        (Some(near), Some(far)) => (parent_pos + near, (parent_size - near - far).max(0.0)),
        (Some(near), None) => (parent_pos + near, local_size),
        (None, Some(far)) => (parent_pos + parent_size - far - local_size, local_size),
        (None, None) => (parent_pos + local_pos, local_size),
    }
}

/// Layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Horizontal (left to right).
    #[default]
    Horizontal,
    /// Vertical (top to bottom).
    Vertical,
}

/// Layout alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Align to start (left/top).
    #[default]
    Start,
    /// Align to center.
    Center,
    /// Align to end (right/bottom).
    End,
    /// Stretch to fill available space.
    Stretch,
}

/// Linear arrangement of children along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Current layout direction.
    pub direction: Direction,
    /// Main axis alignment.
    pub main_alignment: Alignment,
    /// Cross axis alignment.
    pub cross_alignment: Alignment,
    /// Gap between elements.
    pub gap: f32,
    /// Padding around content.
    pub padding: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            direction: Direction::Horizontal,
            main_alignment: Alignment::Start,
            cross_alignment: Alignment::Start,
            gap: 4.0,
            padding: 0.0,
        }
    }
}

impl Layout {
    /// Creates a horizontal layout.
    #[must_use]
    pub fn horizontal() -> Self {
        Self {
            direction: Direction::Horizontal,
            ..Default::default()
        }
    }

    /// Creates a vertical layout.
    #[must_use]
    pub fn vertical() -> Self {
        Self {
            direction: Direction::Vertical,
            ..Default::default()
        }
    }

    /// Sets the gap between elements.
    #[must_use]
    pub const fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Sets padding around content.
    #[must_use]
    pub const fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Sets main axis alignment.
    #[must_use]
    pub const fn align_main(mut self, alignment: Alignment) -> Self {
        self.main_alignment = alignment;
        self
    }

    /// Sets cross axis alignment.
    #[must_use]
    pub const fn align_cross(mut self, alignment: Alignment) -> Self {
        self.cross_alignment = alignment;
        self
    }

    /// Lays out a list of sizes within the given bounds, appending one rect per size.
    #[allow(clippy::cast_precision_loss)]
    pub fn arrange_into(&self, bounds: Rect, sizes: &[(f32, f32)], out: &mut Vec<Rect>) {
        if sizes.is_empty() {
            return;
        }

        let content = bounds.shrink(self.padding);
        let total_gap = self.gap * (sizes.len() - 1) as f32;

        let (main_total, main_start, main_extent) = match self.direction {
            Direction::Horizontal => (sizes.iter().map(|(w, _)| *w).sum::<f32>(), content.x, content.width),
            Direction::Vertical => (sizes.iter().map(|(_, h)| *h).sum::<f32>(), content.y, content.height),
        };

        let mut cursor = match self.main_alignment {
            Alignment::Start | Alignment::Stretch => main_start,
            Alignment::Center => main_start + (main_extent - main_total - total_gap) * 0.5,
            Alignment::End => main_start + main_extent - main_total - total_gap,
        };

        for &(w, h) in sizes {
            let rect = match self.direction {
                Direction::Horizontal => {
                    let (y, height) = self.cross(content.y, content.height, h);
                    Rect::new(cursor, y, w, height)
                }
                Direction::Vertical => {
                    let (x, width) = self.cross(content.x, content.width, w);
                    Rect::new(x, cursor, width, h)
                }
            };
            out.push(rect);
            cursor += match self.direction {
                Direction::Horizontal => w,
                Direction::Vertical => h,
            } + self.gap;
        }
    }

    fn cross(&self, start: f32, extent: f32, size: f32) -> (f32, f32) {
        match self.cross_alignment {
            Alignment::Start => (start, size),
            Alignment::Center => (start + (extent - size) * 0.5, size),
            Alignment::End => (start + extent - size, size),
            Alignment::Stretch => (start, extent),
        }
    }
}
