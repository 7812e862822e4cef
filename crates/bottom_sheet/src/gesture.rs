//! Drag tracking for the sheet panel
//!
//! The panel claims every touch that starts on it. Only the first touch is
//! tracked until it ends or is cancelled; displacement is always measured
//! from where that touch started.

use sheet_core::{Point, Vec2};

/// Displacement of the tracked touch since the gesture started
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    pub dx: f32,
    pub dy: f32,
}

impl From<Vec2> for GestureState {
    fn from(delta: Vec2) -> Self {
        Self {
            dx: delta.x,
            dy: delta.y,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ActiveDrag {
    touch_id: u64,
    start: Point,
    last: GestureState,
}

/// Single-touch drag tracker
#[derive(Clone, Debug, Default)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn touch_id(&self) -> Option<u64> {
        self.active.map(|a| a.touch_id)
    }

    /// Start tracking `touch_id`; returns false if another touch is already tracked
    pub fn begin(&mut self, touch_id: u64, at: Point) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(ActiveDrag {
            touch_id,
            start: at,
            last: GestureState::default(),
        });
        true
    }

    /// Update the tracked touch; returns its displacement
    pub fn update(&mut self, touch_id: u64, at: Point) -> Option<GestureState> {
        let active = self.active.as_mut().filter(|a| a.touch_id == touch_id)?;
        active.last = (at - active.start).into();
        Some(active.last)
    }

    /// End the tracked touch; returns its final displacement
    pub fn release(&mut self, touch_id: u64, at: Point) -> Option<GestureState> {
        let state = self.update(touch_id, at)?;
        self.active = None;
        Some(state)
    }

    /// Abandon the tracked touch; returns the last known displacement
    pub fn cancel(&mut self, touch_id: u64) -> Option<GestureState> {
        let last = self.active.filter(|a| a.touch_id == touch_id)?.last;
        self.active = None;
        Some(last)
    }

    /// Forget any tracked touch
    pub fn reset(&mut self) {
        self.active = None;
    }
}

/// What a released drag does
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseAction {
    /// Close the sheet
    Dismiss,
    /// Spring the panel back to its resting position
    SpringBack,
}

/// Pan offset to apply for a live drag, if any
///
/// Only downward displacement moves the panel; upward displacement and
/// non-draggable sheets leave the offset untouched.
pub fn drag_offset(dy: f32, draggable: bool) -> Option<f32> {
    (draggable && dy > 0.0).then_some(dy)
}

/// Decide what a release with downward displacement `dy` does
pub fn release_action(dy: f32, threshold: f32, draggable: bool) -> ReleaseAction {
    if draggable && dy > threshold {
        ReleaseAction::Dismiss
    } else {
        ReleaseAction::SpringBack
    }
}
