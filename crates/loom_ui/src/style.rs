//! Colors and the theme palette used for default widget primitives.

use serde::Deserialize;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from a packed 0xRRGGBBAA value.
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Linearly interpolates between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Palette for the single primitive each widget kind emits.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Panel and popup surface.
    pub surface: Color,
    /// Idle button.
    pub button: Color,
    /// Hovered button.
    pub button_hover: Color,
    /// Pressed button.
    pub button_pressed: Color,
    /// Drop target highlighted by an accepting drag.
    pub drop_highlight: Color,
    /// Focus ring.
    pub focus: Color,
    /// Tooltip background.
    pub tooltip: Color,
}

impl Theme {
    /// Dark terminal palette.
    pub const DARK: Self = Self {
        surface: Color::rgba(0.05, 0.05, 0.08, 0.95),
        button: Color::rgba(0.12, 0.14, 0.18, 1.0),
        button_hover: Color::rgba(0.18, 0.22, 0.28, 1.0),
        button_pressed: Color::rgba(0.08, 0.10, 0.12, 1.0),
        drop_highlight: Color::rgba(0.2, 0.9, 0.4, 0.6),
        focus: Color::rgba(0.2, 0.9, 1.0, 1.0),
        tooltip: Color::rgba(0.02, 0.02, 0.03, 0.95),
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::DARK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lerp() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);

        assert!((mid.r - 0.5).abs() < 0.01);
        assert!((mid.g - 0.5).abs() < 0.01);
        assert!((mid.b - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_color_hex() {
        let color = Color::hex(0xFF00_00FF);
        assert!((color.r - 1.0).abs() < 0.01);
        assert!(color.g.abs() < 0.01);
        assert!((color.a - 1.0).abs() < 0.01);
    }
}
