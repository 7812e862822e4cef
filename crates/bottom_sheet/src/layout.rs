//! Sheet geometry and hit testing
//!
//! Both presentations produce the same layers, bottom to top:
//!
//! 1. the wrapper, tinted with the backdrop color
//! 2. a transparent tap-catcher filling the wrapper
//! 3. the panel, anchored to the wrapper's bottom edge, `height` tall and
//!    translated by the pan offset
//! 4. the optional drag handle, centered at the top of the panel
//! 5. the caller's content, filling the rest of the panel
//!
//! Modal sheets use the whole viewport as the wrapper. Overlay sheets use a
//! full-width strip of the configured height at the bottom of the viewport,
//! so touches above it fall through to the host UI.

use sheet_core::{Color, Point, Rect, Size, Vec2};

use crate::config::{Presentation, SheetConfig};

/// Fixed visual constants
pub mod style {
    use sheet_core::Color;

    pub const PANEL_BACKGROUND: Color = Color::WHITE;
    pub const PANEL_CORNER_RADIUS: f32 = 10.0;
    pub const DRAG_ICON_WIDTH: f32 = 40.0;
    pub const DRAG_ICON_HEIGHT: f32 = 6.0;
    pub const DRAG_ICON_RADIUS: f32 = 3.0;
    pub const DRAG_ICON_MARGIN: f32 = 10.0;
}

/// The animated sheet panel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelFrame {
    /// On-screen bounds after the pan translation
    pub rect: Rect,
    pub background: Color,
    /// Radius of the two top corners
    pub corner_radius: f32,
    /// Pan translation applied to the panel
    pub translation: Vec2,
}

/// The drag-handle indicator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragIconFrame {
    pub rect: Rect,
    pub color: Color,
    pub corner_radius: f32,
}

/// Which layer a point lands on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    /// The panel (drag handle and content included)
    Panel,
    /// The tap-catcher outside the panel
    Backdrop,
    /// Outside the sheet entirely
    Outside,
}

/// Resolved geometry of a visible sheet
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetLayout {
    pub presentation: Presentation,
    pub wrapper: Rect,
    pub backdrop: Color,
    pub tap_catcher: Rect,
    pub panel: PanelFrame,
    pub drag_icon: Option<DragIconFrame>,
    /// Area available to caller content
    pub content: Rect,
}

impl SheetLayout {
    /// Lay out the sheet for the current animated height and pan offset
    pub fn compute(viewport: Size, config: &SheetConfig, height: f32, pan: Vec2) -> Self {
        let presentation = config.presentation();
        let wrapper = match presentation {
            Presentation::Modal => Rect::new(0.0, 0.0, viewport.width, viewport.height),
            Presentation::Overlay => Rect::new(
                0.0,
                viewport.height - config.height,
                viewport.width,
                config.height,
            ),
        };

        let height = height.max(0.0);
        let resting = Rect::new(0.0, wrapper.max_y() - height, viewport.width, height);
        let panel_rect = resting.translate(pan);

        let drag_icon = config.has_draggable_icon.then(|| DragIconFrame {
            rect: Rect::new(
                panel_rect.x() + (panel_rect.width() - style::DRAG_ICON_WIDTH) / 2.0,
                panel_rect.y() + style::DRAG_ICON_MARGIN,
                style::DRAG_ICON_WIDTH,
                style::DRAG_ICON_HEIGHT,
            ),
            color: config.drag_icon_color,
            corner_radius: style::DRAG_ICON_RADIUS,
        });

        let header = if drag_icon.is_some() {
            style::DRAG_ICON_HEIGHT + style::DRAG_ICON_MARGIN * 2.0
        } else {
            0.0
        };
        let content = Rect::new(
            panel_rect.x(),
            panel_rect.y() + header.min(height),
            panel_rect.width(),
            (height - header).max(0.0),
        );

        Self {
            presentation,
            wrapper,
            backdrop: config.backdrop_color(),
            tap_catcher: wrapper,
            panel: PanelFrame {
                rect: panel_rect,
                background: style::PANEL_BACKGROUND,
                corner_radius: style::PANEL_CORNER_RADIUS,
                translation: pan,
            },
            drag_icon,
            content,
        }
    }

    /// Find the topmost layer under `point`
    pub fn hit_test(&self, point: Point) -> Hit {
        if self.panel.rect.contains(point) {
            Hit::Panel
        } else if self.tap_catcher.contains(point) {
            Hit::Backdrop
        } else {
            Hit::Outside
        }
    }
}
