//! Draw lists and the renderer-facing capabilities.
//!
//! The UI never rasterizes. Each frame it appends quads (and text runs for the
//! external text shaper) to a [`DrawList`], which travels to the render thread
//! through the frame channel.

use std::collections::HashMap;

use crate::geometry::{Point, Rect};
use crate::style::Color;

/// Texture region a quad samples from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRegion {
    /// Texture (atlas page) ID.
    pub texture: u32,
    /// UV coordinates (u0, v0, u1, v1).
    pub uv: [f32; 4],
}

impl SpriteRegion {
    /// Untextured region (texture 0 is the white pixel page).
    pub const SOLID: Self = Self {
        texture: 0,
        uv: [0.0, 0.0, 1.0, 1.0],
    };
}

/// Size and texture information for a named sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteInfo {
    /// Natural size in virtual units.
    pub size: (f32, f32),
    /// Where the sprite lives in the atlas.
    pub region: SpriteRegion,
}

/// Sprite/metrics lookup provided by the atlas subsystem.
pub trait SpriteLookup {
    /// Returns the sprite registered under `name`, if any.
    fn sprite(&self, name: &str) -> Option<SpriteInfo>;
}

impl SpriteLookup for HashMap<String, SpriteInfo> {
    fn sprite(&self, name: &str) -> Option<SpriteInfo> {
        self.get(name).copied()
    }
}

/// Lookup that knows no sprites; every widget falls back to solid quads.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSprites;

impl SpriteLookup for NoSprites {
    fn sprite(&self, _name: &str) -> Option<SpriteInfo> {
        None
    }
}

/// GPU-ready quad.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Quad {
    /// Destination (x, y, width, height).
    pub dest: [f32; 4],
    /// UV coordinates (u0, v0, u1, v1).
    pub uv: [f32; 4],
    /// Tint color (RGBA).
    pub tint: [f32; 4],
    /// Scissor rect (x, y, width, height).
    pub clip: [f32; 4],
    /// Texture ID.
    pub texture: u32,
    /// Keeps the struct 16-byte aligned for vertex pulling.
    pub _pad: [u32; 3],
}

/// A text run handed to the external shaper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRun {
    start: u32,
    len: u32,
    /// Baseline origin.
    pub origin: Point,
    /// Text color.
    pub color: Color,
    /// Scissor rect.
    pub clip: Rect,
}

/// One frame's worth of drawing commands.
///
/// Buffers are kept between frames; [`DrawList::reset`] only clears lengths.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    generation: u64,
    quads: Vec<Quad>,
    runs: Vec<TextRun>,
    text: String,
}

impl DrawList {
    /// Creates a draw list with reserved capacity.
    #[must_use]
    pub fn with_capacity(quads: usize) -> Self {
        Self {
            generation: 0,
            quads: Vec::with_capacity(quads),
            runs: Vec::with_capacity(quads / 4),
            text: String::with_capacity(quads * 8),
        }
    }

    /// Clears the list and stamps it with a new frame generation.
    pub fn reset(&mut self, generation: u64) {
        self.generation = generation;
        self.quads.clear();
        self.runs.clear();
        self.text.clear();
    }

    /// Frame generation this list was built for.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Appends a quad. Fully clipped quads are dropped.
    pub fn push_quad(&mut self, dest: Rect, source: SpriteRegion, tint: Color, clip: Rect) {
        if clip.is_empty() || !dest.intersects(&clip) {
            return;
        }
        self.quads.push(Quad {
            dest: [dest.x, dest.y, dest.width, dest.height],
            uv: source.uv,
            tint: tint.to_array(),
            clip: [clip.x, clip.y, clip.width, clip.height],
            texture: source.texture,
            _pad: [0; 3],
        });
    }

    /// Appends a text run. Empty or fully clipped text is dropped.
    pub fn push_text(&mut self, text: &str, origin: Point, color: Color, clip: Rect) {
        if text.is_empty() || clip.is_empty() {
            return;
        }
        let (Ok(start), Ok(len)) = (u32::try_from(self.text.len()), u32::try_from(text.len())) else {
            return;
        };
        self.text.push_str(text);
        self.runs.push(TextRun {
            start,
            len,
            origin,
            color,
            clip,
        });
    }

    /// Quads in draw order.
    #[inline]
    #[must_use]
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// Text runs in draw order.
    #[inline]
    #[must_use]
    pub fn text_runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Returns the string of a text run from this list.
    #[must_use]
    pub fn text(&self, run: &TextRun) -> &str {
        let start = run.start as usize;
        self.text.get(start..start + run.len as usize).unwrap_or_default()
    }

    /// Quads as raw bytes for buffer upload.
    #[must_use]
    pub fn quad_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.quads)
    }

    /// Returns true if nothing was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty() && self.runs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_frame() {
        let mut list = DrawList::with_capacity(16);
        list.reset(3);

        list.push_quad(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            SpriteRegion::SOLID,
            Color::WHITE,
            Rect::from_size(1920.0, 1080.0),
        );
        list.push_text("HOLD", Point::new(4.0, 4.0), Color::WHITE, Rect::from_size(100.0, 50.0));

        assert_eq!(list.generation(), 3);
        assert_eq!(list.quads().len(), 1);
        assert_eq!(list.text(&list.text_runs()[0]), "HOLD");
        assert_eq!(list.quad_bytes().len(), std::mem::size_of::<Quad>());

        list.reset(4);
        assert!(list.is_empty());
    }

    #[test]
    fn test_clipped_quad_dropped() {
        let mut list = DrawList::default();
        list.push_quad(
            Rect::new(500.0, 500.0, 10.0, 10.0),
            SpriteRegion::SOLID,
            Color::WHITE,
            Rect::from_size(100.0, 100.0),
        );
        assert!(list.quads().is_empty());
    }

    #[test]
    fn test_sprite_map_lookup() {
        let mut sprites = HashMap::new();
        sprites.insert(
            "icon_citizen".to_owned(),
            SpriteInfo {
                size: (32.0, 32.0),
                region: SpriteRegion { texture: 2, uv: [0.0, 0.0, 0.5, 0.5] },
            },
        );

        assert_eq!(sprites.sprite("icon_citizen").map(|s| s.size), Some((32.0, 32.0)));
        assert!(sprites.sprite("missing").is_none());
        assert!(NoSprites.sprite("icon_citizen").is_none());
    }
}
