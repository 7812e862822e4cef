//! Sheet configuration
//!
//! `SheetConfig` is owned by the embedding application and never mutated by
//! the widget. It can be built in code or loaded from TOML:
//!
//! ```toml
//! height = 320.0
//! draggable = true
//! use_modal = false
//! has_draggable_icon = true
//! drag_icon_color = "#A3A3A3"
//! background_color = "#25252599"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sheet_core::Color;

use crate::error::{Result, SheetError};

/// Default drag-handle color
pub const DEFAULT_DRAG_ICON_COLOR: Color = Color::rgb(163.0 / 255.0, 163.0 / 255.0, 163.0 / 255.0);

/// Default modal backdrop tint (`#25252599`)
pub const DEFAULT_MODAL_BACKDROP: Color =
    Color::rgba(37.0 / 255.0, 37.0 / 255.0, 37.0 / 255.0, 153.0 / 255.0);

/// How the sheet is mounted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Presentation {
    /// Inside the host's native modal layer, covering the whole viewport
    Modal,
    /// Plain full-width overlay anchored to the bottom of the viewport
    Overlay,
}

/// Configuration for a bottom sheet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetConfig {
    /// Target expanded height in logical pixels
    pub height: f32,
    /// Whether dragging the panel down can dismiss it
    #[serde(default = "default_true")]
    pub draggable: bool,
    /// Modal vs. overlay presentation
    #[serde(default = "default_true")]
    pub use_modal: bool,
    /// Show the drag handle at the top of the panel
    #[serde(default)]
    pub has_draggable_icon: bool,
    /// Drag handle color
    #[serde(default = "default_drag_icon_color")]
    pub drag_icon_color: Color,
    /// Wrapper tint; defaults depend on the presentation
    #[serde(default)]
    pub background_color: Option<Color>,
    /// Show animation duration
    #[serde(default = "default_open_duration_ms")]
    pub open_duration_ms: u32,
    /// Hide animation duration
    #[serde(default = "default_close_duration_ms")]
    pub close_duration_ms: u32,
}

fn default_true() -> bool {
    true
}

fn default_drag_icon_color() -> Color {
    DEFAULT_DRAG_ICON_COLOR
}

fn default_open_duration_ms() -> u32 {
    300
}

fn default_close_duration_ms() -> u32 {
    400
}

impl SheetConfig {
    /// Create a config with the given height and default options
    pub fn new(height: f32) -> Self {
        Self {
            height,
            draggable: true,
            use_modal: true,
            has_draggable_icon: false,
            drag_icon_color: DEFAULT_DRAG_ICON_COLOR,
            background_color: None,
            open_duration_ms: default_open_duration_ms(),
            close_duration_ms: default_close_duration_ms(),
        }
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SheetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn presentation(&self) -> Presentation {
        if self.use_modal {
            Presentation::Modal
        } else {
            Presentation::Overlay
        }
    }

    /// Effective wrapper tint
    ///
    /// Modal sheets dim the screen by default; overlay sheets are transparent
    /// unless a color was configured.
    pub fn backdrop_color(&self) -> Color {
        match (self.background_color, self.presentation()) {
            (Some(color), _) => color,
            (None, Presentation::Modal) => DEFAULT_MODAL_BACKDROP,
            (None, Presentation::Overlay) => Color::TRANSPARENT,
        }
    }

    /// Downward drag distance that dismisses the sheet on release
    pub fn dismiss_threshold(&self) -> f32 {
        self.height / 3.0
    }
}
