//! Visibility state machine
//!
//! ```text
//!            SHOW                ANIMATION_COMPLETE
//!   Hidden ───────▶ Opening ─────────────────────▶ Open
//!     ▲                │ close event                 │ close event
//!     │                ▼                             │
//!     └──────────── Closing ◀────────────────────────┘
//!   ANIMATION_COMPLETE
//! ```
//!
//! A "close event" is any of `CLOSE`, `BACK_PRESS`, `BACKDROP_TAP`,
//! `DRAG_DISMISS`, or `DISMISS_REQUEST`. Events that have no transition from
//! the current state are ignored.

use sheet_core::StateTransitions;

/// Event types for the sheet state machine
pub mod sheet_events {
    /// Open the sheet (Hidden -> Opening)
    pub const SHOW: u32 = 30001;
    /// Programmatic close
    pub const CLOSE: u32 = 30002;
    /// Intercepted hardware back press (overlay presentation)
    pub const BACK_PRESS: u32 = 30003;
    /// Tap on the transparent area outside the panel
    pub const BACKDROP_TAP: u32 = 30004;
    /// Drag released past the dismiss threshold
    pub const DRAG_DISMISS: u32 = 30005;
    /// Dismiss request from the host modal layer
    pub const DISMISS_REQUEST: u32 = 30006;
    /// Height animation reached its target
    pub const ANIMATION_COMPLETE: u32 = 30007;
}

/// Lifecycle of a bottom sheet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SheetState {
    /// Not rendered
    #[default]
    Hidden,
    /// Height animating up to its target
    Opening,
    /// Fully expanded
    Open,
    /// Height animating down to zero
    Closing,
}

impl SheetState {
    /// Whether the sheet is mounted and rendered
    pub fn is_visible(&self) -> bool {
        !matches!(self, SheetState::Hidden)
    }

    pub fn is_open(&self) -> bool {
        matches!(self, SheetState::Open)
    }

    pub fn is_animating(&self) -> bool {
        matches!(self, SheetState::Opening | SheetState::Closing)
    }
}

fn is_close_event(event: u32) -> bool {
    use sheet_events::*;
    matches!(
        event,
        CLOSE | BACK_PRESS | BACKDROP_TAP | DRAG_DISMISS | DISMISS_REQUEST
    )
}

impl StateTransitions for SheetState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use sheet_events::*;
        use SheetState::*;

        match (self, event) {
            (Hidden, SHOW) => Some(Opening),
            (Opening, ANIMATION_COMPLETE) => Some(Open),
            // Closing may interrupt the opening animation
            (Opening | Open, e) if is_close_event(e) => Some(Closing),
            (Closing, ANIMATION_COMPLETE) => Some(Hidden),
            _ => None,
        }
    }
}
