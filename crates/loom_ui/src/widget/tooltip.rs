//! Hover tooltips.
//!
//! With the default zero delay a tooltip shows on the same frame as the hover
//! that armed it. Tooltips are drawn after everything else.

use crate::config::TooltipSettings;
use crate::geometry::{Point, Rect};
use crate::render::{DrawList, SpriteRegion};

// Monospace estimate until the text shaper reports real metrics.
const CHAR_WIDTH: f32 = 8.0;
const LINE_HEIGHT: f32 = 16.0;

/// A tooltip to be displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Text content.
    pub text: String,
    /// Cursor position it was shown at.
    pub cursor: Point,
    /// Bounds after layout.
    pub bounds: Rect,
}

impl Tooltip {
    /// Creates a tooltip at the cursor.
    #[must_use]
    pub fn new(text: impl Into<String>, cursor: Point) -> Self {
        Self {
            text: text.into(),
            cursor,
            bounds: Rect::ZERO,
        }
    }

    /// Sizes the tooltip and keeps it inside the viewport.
    ///
    /// Prefers below-right of the cursor, flips to the other side on overflow.
    #[allow(clippy::cast_precision_loss)]
    pub fn layout(&mut self, settings: &TooltipSettings, viewport: Rect) {
        let chars = self.text.chars().count() as f32;
        let text_width = (chars * CHAR_WIDTH).min(settings.max_width);
        let lines = (chars * CHAR_WIDTH / settings.max_width).ceil().max(1.0);

        let width = text_width + settings.padding * 2.0;
        let height = lines * LINE_HEIGHT + settings.padding * 2.0;
        let (dx, dy) = settings.cursor_offset;

        let mut x = self.cursor.x + dx;
        let mut y = self.cursor.y + dy;
        if x + width > viewport.right() {
            x = self.cursor.x - width - dx;
        }
        if y + height > viewport.bottom() {
            y = self.cursor.y - height - dy;
        }

        self.bounds = Rect::new(x, y, width, height).clamp_inside(&viewport);
    }

    fn draw(&self, settings: &TooltipSettings, viewport: Rect, list: &mut DrawList) {
        list.push_quad(self.bounds, SpriteRegion::SOLID, settings.background, viewport);
        list.push_text(
            &self.text,
            Point::new(self.bounds.x + settings.padding, self.bounds.y + settings.padding),
            settings.text,
            self.bounds,
        );
    }
}

/// Tooltip armed by hover.
#[derive(Debug, Clone)]
struct Pending {
    text: String,
    cursor: Point,
    waited: f32,
}

/// Owns the single visible tooltip.
#[derive(Debug, Clone)]
pub struct TooltipManager {
    pending: Option<Pending>,
    current: Option<Tooltip>,
    settings: TooltipSettings,
    viewport: Rect,
}

impl TooltipManager {
    /// Creates a manager for the given viewport.
    #[must_use]
    pub fn new(settings: TooltipSettings, viewport: Rect) -> Self {
        Self {
            pending: None,
            current: None,
            settings,
            viewport,
        }
    }

    /// Updates the viewport used for clamping.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Arms a tooltip. Shows immediately when the delay is zero.
    pub fn arm(&mut self, text: &str, cursor: Point) {
        self.current = None;
        if self.settings.delay <= 0.0 {
            self.pending = None;
            self.show(text, cursor);
        } else {
            self.pending = Some(Pending {
                text: text.to_owned(),
                cursor,
                waited: 0.0,
            });
        }
    }

    /// Shows a tooltip now.
    pub fn show(&mut self, text: &str, cursor: Point) {
        let mut tooltip = Tooltip::new(text, cursor);
        tooltip.layout(&self.settings, self.viewport);
        self.current = Some(tooltip);
    }

    /// Hides the tooltip and drops any armed one.
    pub fn hide(&mut self) {
        self.pending = None;
        self.current = None;
    }

    /// Advances the delay timer.
    ///
    /// Returns true if a tooltip became visible.
    pub fn update(&mut self, dt: f32) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        pending.waited += dt;
        if pending.waited < self.settings.delay {
            return false;
        }
        if let Some(pending) = self.pending.take() {
            self.show(&pending.text, pending.cursor);
        }
        true
    }

    /// Returns true if a tooltip is visible.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Returns true if a tooltip is visible or waiting for its delay.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.current.is_some() || self.pending.is_some()
    }

    /// The visible tooltip.
    #[must_use]
    pub fn current(&self) -> Option<&Tooltip> {
        self.current.as_ref()
    }

    /// Draws the visible tooltip.
    pub fn draw(&self, list: &mut DrawList) {
        if let Some(tooltip) = &self.current {
            tooltip.draw(&self.settings, self.viewport, list);
        }
    }
}

impl Default for TooltipManager {
    fn default() -> Self {
        Self::new(TooltipSettings::default(), Rect::from_size(1920.0, 1080.0))
    }
}
