//! Host events

use sheet_core::Size;

use crate::input::TouchEvent;

/// Events a host event loop forwards to widgets
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// Touch input
    Touch(TouchEvent),
    /// Hardware back button pressed
    BackPressed,
    /// Viewport size changed (logical pixels)
    Resized(Size),
    /// Frame tick - advance animations by `dt_ms`
    Frame {
        /// Milliseconds since the previous frame
        dt_ms: f32,
    },
}
