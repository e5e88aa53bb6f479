//! Runtime configuration, loaded once at startup from TOML.
//!
//! ```toml
//! [viewport]
//! width = 1920.0
//! height = 1080.0
//!
//! [drag]
//! threshold = 4.0
//!
//! [modal]
//! gap = 4.0
//!
//! [tooltip]
//! delay = 0.0
//! cursor_offset = [12.0, 12.0]
//!
//! [diagnostics]
//! dispatch_log_capacity = 256
//!
//! [frame]
//! reserve_quads = 4096
//! input_capacity = 1024
//! ```
//!
//! Every section and key is optional; missing values take the defaults below.

use std::path::Path;

use serde::Deserialize;

use crate::error::{UiError, UiResult};
use crate::geometry::Rect;
use crate::style::{Color, Theme};

/// Virtual viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width in virtual units.
    pub width: f32,
    /// Height in virtual units.
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

/// Drag gesture tuning.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Pointer travel (virtual px) before a press becomes a drag.
    pub threshold: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self { threshold: 4.0 }
    }
}

/// Modal popup placement.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    /// Space between the anchor rect and the popup.
    pub gap: f32,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self { gap: 4.0 }
    }
}

/// Hover tooltip behavior.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TooltipSettings {
    /// Seconds between hover and display. Zero shows on the same frame.
    pub delay: f32,
    /// Offset from the cursor.
    pub cursor_offset: (f32, f32),
    /// Padding inside the tooltip.
    pub padding: f32,
    /// Maximum width before wrapping.
    pub max_width: f32,
    /// Background color.
    pub background: Color,
    /// Text color.
    pub text: Color,
}

impl Default for TooltipSettings {
    fn default() -> Self {
        Self {
            delay: 0.0,
            cursor_offset: (12.0, 12.0),
            padding: 8.0,
            max_width: 300.0,
            background: Theme::DARK.tooltip,
            text: Color::rgba(0.9, 0.9, 0.9, 1.0),
        }
    }
}

/// Diagnostics switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Deliveries kept in the router's dispatch log. Zero disables logging.
    pub dispatch_log_capacity: usize,
}

/// Frame buffer sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Quads reserved per frame buffer.
    pub reserve_quads: usize,
    /// Input events queued between ticks before senders see a full queue.
    pub input_capacity: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            reserve_quads: 4096,
            input_capacity: 1024,
        }
    }
}

/// Complete UI configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Viewport size.
    pub viewport: ViewportConfig,
    /// Drag tuning.
    pub drag: DragConfig,
    /// Modal placement.
    pub modal: ModalConfig,
    /// Tooltip behavior.
    pub tooltip: TooltipSettings,
    /// Diagnostics.
    pub diagnostics: DiagnosticsConfig,
    /// Frame buffers.
    pub frame: FrameConfig,
}

impl UiConfig {
    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] on malformed TOML or out-of-range values.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| UiError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ConfigIo`] if the file cannot be read, otherwise as
    /// [`UiConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| UiError::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded ui config");
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> UiResult<()> {
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(UiError::InvalidConfig(format!(
                "viewport must be positive, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !(self.drag.threshold >= 0.0) {
            return Err(UiError::InvalidConfig(format!(
                "drag.threshold must be >= 0, got {}",
                self.drag.threshold
            )));
        }
        if !(self.modal.gap >= 0.0) {
            return Err(UiError::InvalidConfig(format!("modal.gap must be >= 0, got {}", self.modal.gap)));
        }
        if !(self.tooltip.delay >= 0.0) {
            return Err(UiError::InvalidConfig(format!(
                "tooltip.delay must be >= 0, got {}",
                self.tooltip.delay
            )));
        }
        if self.frame.input_capacity == 0 {
            return Err(UiError::InvalidConfig("frame.input_capacity must be > 0".to_owned()));
        }
        Ok(())
    }

    /// Viewport as a rect at the origin.
    #[must_use]
    pub fn viewport_rect(&self) -> Rect {
        Rect::from_size(self.viewport.width, self.viewport.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = UiConfig::from_toml_str("").unwrap();
        assert_eq!(config, UiConfig::default());
        assert_eq!(config.drag.threshold, 4.0);
        assert_eq!(config.viewport_rect(), Rect::from_size(1920.0, 1080.0));
        assert_eq!(config.diagnostics.dispatch_log_capacity, 0);
    }

    #[test]
    fn test_partial_override() {
        let config = UiConfig::from_toml_str(
            r"
            [viewport]
            width = 1280.0

            [drag]
            threshold = 8.0

            [diagnostics]
            dispatch_log_capacity = 64
            ",
        )
        .unwrap();

        assert_eq!(config.viewport.width, 1280.0);
        assert_eq!(config.viewport.height, 1080.0);
        assert_eq!(config.drag.threshold, 8.0);
        assert_eq!(config.diagnostics.dispatch_log_capacity, 64);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = UiConfig::from_toml_str("[viewport]\nwidth = 0.0").unwrap_err();
        assert!(matches!(err, UiError::InvalidConfig(_)));

        let err = UiConfig::from_toml_str("[drag]\nthreshold = -1.0").unwrap_err();
        assert!(matches!(err, UiError::InvalidConfig(_)));

        let err = UiConfig::from_toml_str("[drag\nthreshold = 1.0").unwrap_err();
        assert!(matches!(err, UiError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = UiConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, UiError::ConfigIo { .. }));
    }
}
