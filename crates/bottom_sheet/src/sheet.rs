//! The bottom sheet widget
//!
//! `BottomSheet` coordinates three pieces of transient state (the lifecycle
//! state, the animated panel height, and the animated pan offset) with one
//! drag tracker and, in overlay presentation, one back-button subscription.
//!
//! The host drives it:
//!
//! - `show()` / `close()` from application code
//! - `handle_touch()` for touch input routed to the sheet
//! - `request_dismiss()` when the native modal layer asks to close
//! - `tick(dt_ms)` once per frame while `tick` keeps returning `true`
//! - `frame()` to render
//!
//! Close cleanup (pan reset, hide, height reset, close callback) runs from
//! `tick` only once the hide animation has reached zero. Callbacks run with
//! no internal borrow held, so they may call back into the sheet.
//!
//! # Example
//!
//! ```rust
//! use bottom_sheet::prelude::*;
//!
//! let sheet = bottom_sheet(300.0)
//!     .has_draggable_icon(true)
//!     .viewport(Size::new(390.0, 844.0))
//!     .on_close(|| tracing::info!("sheet closed"))
//!     .build();
//!
//! sheet.show();
//! while sheet.tick(16.0) {}
//! assert_eq!(sheet.height(), 300.0);
//!
//! sheet.close();
//! while sheet.tick(16.0) {}
//! assert!(!sheet.is_visible());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use sheet_animation::{AnimatedValue, AnimatedValueXY, AnimationId, Easing, SpringConfig};
use sheet_core::{Color, Point, Size, StateTransitions, Vec2};
use sheet_platform::{BackHandlerRegistry, BackSubscription, HostEvent, TouchEvent};

use crate::config::{Presentation, SheetConfig};
use crate::gesture::{drag_offset, release_action, DragTracker, GestureState, ReleaseAction};
use crate::layout::{Hit, SheetLayout};
use crate::state::{sheet_events, SheetState};

/// Callback invoked after the close animation completes
pub type OnCloseCallback = Rc<dyn Fn()>;

/// A rendered sheet: geometry plus the caller's content
pub struct SheetFrame<C> {
    pub layout: SheetLayout,
    pub content: Rc<C>,
}

impl<C> Clone for SheetFrame<C> {
    fn clone(&self) -> Self {
        Self {
            layout: self.layout,
            content: Rc::clone(&self.content),
        }
    }
}

struct SheetInner {
    config: SheetConfig,
    state: SheetState,
    height: AnimatedValue,
    pan: AnimatedValueXY,
    drag: DragTracker,
    /// Touch that went down on the tap-catcher
    backdrop_touch: Option<u64>,
    /// Height animation whose completion advances the state machine
    height_animation: Option<AnimationId>,
    /// `show()` arrived while closing
    reopen_pending: bool,
    back_subscription: Option<BackSubscription>,
    viewport: Size,
    on_close: Option<OnCloseCallback>,
}

impl SheetInner {
    fn layout(&self) -> SheetLayout {
        SheetLayout::compute(
            self.viewport,
            &self.config,
            self.height.get(),
            self.pan.get(),
        )
    }

    fn begin_close(&mut self, event: u32) -> bool {
        match self.state {
            SheetState::Hidden => return false,
            SheetState::Closing => {
                if self.reopen_pending {
                    tracing::debug!("BottomSheet: close while closing cancels pending reopen");
                    self.reopen_pending = false;
                }
                return false;
            }
            SheetState::Opening | SheetState::Open => {}
        }

        let from = self.state;
        if !self.state.apply(event) {
            return false;
        }
        tracing::debug!(
            "BottomSheet: {:?} -> {:?} (event {}, height {:.1})",
            from,
            self.state,
            event,
            self.height.get()
        );

        self.release_back_interceptor();
        self.drag.reset();
        self.backdrop_touch = None;
        self.height_animation = Some(self.height.animate_to(
            0.0,
            self.config.close_duration_ms,
            Easing::EaseInOut,
        ));
        true
    }

    /// Cleanup after the hide animation; returns the close callback to run
    fn finish_close(&mut self) -> Option<OnCloseCallback> {
        self.pan.reset(Vec2::ZERO);
        self.state.apply(sheet_events::ANIMATION_COMPLETE);
        self.height.reset(0.0);
        self.height_animation = None;
        self.drag.reset();
        self.backdrop_touch = None;
        tracing::debug!("BottomSheet: closed");
        self.on_close.clone()
    }

    fn release_back_interceptor(&mut self) {
        if let Some(mut subscription) = self.back_subscription.take() {
            subscription.remove();
            tracing::debug!("BottomSheet: back interceptor released");
        }
    }

    fn apply_drag(&mut self, gesture: GestureState) {
        if let Some(offset) = drag_offset(gesture.dy, self.config.draggable) {
            self.pan.set_y(offset);
        }
    }

    fn finish_drag(&mut self, gesture: GestureState) {
        let threshold = self.config.dismiss_threshold();
        match release_action(gesture.dy, threshold, self.config.draggable) {
            ReleaseAction::Dismiss => {
                tracing::debug!(
                    "BottomSheet: drag released at dy={:.1} past threshold {:.1}",
                    gesture.dy,
                    threshold
                );
                self.begin_close(sheet_events::DRAG_DISMISS);
            }
            ReleaseAction::SpringBack => self.spring_back(),
        }
    }

    fn spring_back(&mut self) {
        self.pan
            .spring_to(Vec2::ZERO, SpringConfig::platform_default());
    }
}

/// A draggable bottom sheet
///
/// Cloning yields another handle to the same sheet. Handles are `!Send`:
/// the sheet lives on the UI thread.
pub struct BottomSheet<C = ()> {
    inner: Rc<RefCell<SheetInner>>,
    content: Rc<C>,
    back_handlers: BackHandlerRegistry,
}

impl<C> Clone for BottomSheet<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            content: Rc::clone(&self.content),
            back_handlers: self.back_handlers.clone(),
        }
    }
}

impl BottomSheet<()> {
    /// Create a sheet with no content from a config
    pub fn new(config: SheetConfig) -> Self {
        BottomSheetBuilder::from_config(config).build()
    }
}

impl<C> BottomSheet<C> {
    /// Open the sheet
    ///
    /// Ignored while opening or open. While closing, the reopen is queued
    /// and runs right after the close completes.
    pub fn show(&self) {
        let mut inner = self.inner.borrow_mut();
        match inner.state {
            SheetState::Hidden => {}
            SheetState::Closing => {
                tracing::debug!("BottomSheet: show while closing, reopening after close");
                inner.reopen_pending = true;
                return;
            }
            SheetState::Opening | SheetState::Open => {
                tracing::debug!("BottomSheet: show ignored in {:?}", inner.state);
                return;
            }
        }

        inner.state.apply(sheet_events::SHOW);
        tracing::debug!(
            "BottomSheet: Hidden -> Opening ({:?}, height {:.1})",
            inner.config.presentation(),
            inner.config.height
        );

        if inner.config.presentation() == Presentation::Overlay
            && inner.back_subscription.is_none()
        {
            let weak = Rc::downgrade(&self.inner);
            inner.back_subscription = Some(self.back_handlers.add_listener(move || {
                match weak.upgrade() {
                    Some(inner) => {
                        inner.borrow_mut().begin_close(sheet_events::BACK_PRESS);
                        true
                    }
                    None => false,
                }
            }));
            tracing::debug!("BottomSheet: back interceptor installed");
        }

        let target = inner.config.height;
        let duration = inner.config.open_duration_ms;
        inner.height_animation = Some(inner.height.animate_to(target, duration, Easing::EaseInOut));
    }

    /// Close the sheet
    ///
    /// Ignored when hidden or already closing.
    pub fn close(&self) {
        self.inner.borrow_mut().begin_close(sheet_events::CLOSE);
    }

    /// Close in response to the host modal layer's dismiss request
    pub fn request_dismiss(&self) {
        self.inner
            .borrow_mut()
            .begin_close(sheet_events::DISMISS_REQUEST);
    }

    /// Advance animations by `dt_ms`; returns true while anything is animating
    pub fn tick(&self, dt_ms: f32) -> bool {
        let (on_close, reopen, animating) = {
            let mut inner = self.inner.borrow_mut();
            inner.height.tick(dt_ms);
            inner.pan.tick(dt_ms);
            inner.pan.take_completions();

            let mut on_close = None;
            let mut closed = false;
            for completion in inner.height.take_completions() {
                if !completion.finished || inner.height_animation != Some(completion.id) {
                    continue;
                }
                inner.height_animation = None;
                match inner.state {
                    SheetState::Opening => {
                        inner.state.apply(sheet_events::ANIMATION_COMPLETE);
                        tracing::debug!("BottomSheet: Opening -> Open");
                    }
                    SheetState::Closing => {
                        on_close = inner.finish_close();
                        closed = true;
                    }
                    _ => {}
                }
            }

            let reopen = closed && std::mem::take(&mut inner.reopen_pending);
            let animating = inner.height.is_animating() || inner.pan.is_animating();
            (on_close, reopen, animating)
        };

        if let Some(callback) = on_close {
            callback();
        }
        if reopen {
            self.show();
            return true;
        }
        animating || self.is_animating()
    }

    /// Route a touch event; returns whether the sheet consumed it
    pub fn handle_touch(&self, event: &TouchEvent) -> bool {
        let mut inner = self.inner.borrow_mut();
        if !inner.state.is_visible() {
            return false;
        }

        match *event {
            TouchEvent::Started { id, x, y } => {
                let point = Point::new(x, y);
                match inner.layout().hit_test(point) {
                    Hit::Panel => {
                        inner.drag.begin(id, point);
                        true
                    }
                    Hit::Backdrop => {
                        if inner.backdrop_touch.is_none() {
                            inner.backdrop_touch = Some(id);
                        }
                        true
                    }
                    Hit::Outside => false,
                }
            }
            TouchEvent::Moved { id, x, y } => {
                if let Some(gesture) = inner.drag.update(id, Point::new(x, y)) {
                    inner.apply_drag(gesture);
                    true
                } else {
                    inner.backdrop_touch == Some(id)
                }
            }
            TouchEvent::Ended { id, x, y } => {
                let point = Point::new(x, y);
                if let Some(gesture) = inner.drag.release(id, point) {
                    inner.finish_drag(gesture);
                    true
                } else if inner.backdrop_touch == Some(id) {
                    inner.backdrop_touch = None;
                    if inner.layout().hit_test(point) == Hit::Backdrop {
                        inner.begin_close(sheet_events::BACKDROP_TAP);
                    }
                    true
                } else {
                    false
                }
            }
            TouchEvent::Cancelled { id } => {
                if inner.drag.cancel(id).is_some() {
                    inner.spring_back();
                    true
                } else if inner.backdrop_touch == Some(id) {
                    inner.backdrop_touch = None;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Route a host event; returns whether the sheet consumed it
    ///
    /// Back presses are consumed only by visible modal sheets (the native
    /// modal turns them into dismiss requests). Overlay sheets intercept back
    /// presses through the back-handler registry instead, which the host
    /// dispatches to separately.
    pub fn handle_event(&self, event: &HostEvent) -> bool {
        match event {
            HostEvent::Touch(touch) => self.handle_touch(touch),
            HostEvent::BackPressed => {
                let modal_visible = {
                    let inner = self.inner.borrow();
                    inner.state.is_visible()
                        && inner.config.presentation() == Presentation::Modal
                };
                if modal_visible {
                    self.request_dismiss();
                }
                modal_visible
            }
            HostEvent::Resized(size) => {
                self.set_viewport(*size);
                false
            }
            HostEvent::Frame { dt_ms } => self.tick(*dt_ms),
        }
    }

    /// Set the viewport size used for layout and hit testing
    pub fn set_viewport(&self, size: Size) {
        self.inner.borrow_mut().viewport = size;
    }

    /// Geometry and content to render, or None while hidden
    pub fn frame(&self) -> Option<SheetFrame<C>> {
        let layout = self.layout()?;
        Some(SheetFrame {
            layout,
            content: Rc::clone(&self.content),
        })
    }

    /// Geometry of the visible sheet, or None while hidden
    pub fn layout(&self) -> Option<SheetLayout> {
        let inner = self.inner.borrow();
        inner.state.is_visible().then(|| inner.layout())
    }

    pub fn state(&self) -> SheetState {
        self.inner.borrow().state
    }

    pub fn is_visible(&self) -> bool {
        self.state().is_visible()
    }

    /// Whether any animation is still running
    pub fn is_animating(&self) -> bool {
        let inner = self.inner.borrow();
        inner.height.is_animating() || inner.pan.is_animating()
    }

    /// Current animated panel height
    pub fn height(&self) -> f32 {
        self.inner.borrow().height.get()
    }

    /// Current pan offset
    pub fn pan(&self) -> Vec2 {
        self.inner.borrow().pan.get()
    }

    /// Whether a touch drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().drag.is_dragging()
    }

    /// Whether this sheet currently holds a back-button registration
    pub fn has_back_interceptor(&self) -> bool {
        self.inner
            .borrow()
            .back_subscription
            .as_ref()
            .is_some_and(BackSubscription::is_active)
    }

    pub fn config(&self) -> SheetConfig {
        self.inner.borrow().config.clone()
    }

    pub fn content(&self) -> &C {
        &self.content
    }
}

/// Create a bottom sheet builder with the given target height
pub fn bottom_sheet(height: f32) -> BottomSheetBuilder<()> {
    BottomSheetBuilder::from_config(SheetConfig::new(height))
}

/// Builder for [`BottomSheet`]
pub struct BottomSheetBuilder<C> {
    config: SheetConfig,
    content: C,
    on_close: Option<OnCloseCallback>,
    back_handlers: Option<BackHandlerRegistry>,
    viewport: Size,
}

impl BottomSheetBuilder<()> {
    /// Start from an existing config (e.g. loaded from TOML)
    pub fn from_config(config: SheetConfig) -> Self {
        Self {
            config,
            content: (),
            on_close: None,
            back_handlers: None,
            viewport: Size::ZERO,
        }
    }
}

impl<C> BottomSheetBuilder<C> {
    /// Enable or disable drag-to-dismiss
    pub fn draggable(mut self, draggable: bool) -> Self {
        self.config.draggable = draggable;
        self
    }

    /// Choose modal (true) or overlay (false) presentation
    pub fn use_modal(mut self, use_modal: bool) -> Self {
        self.config.use_modal = use_modal;
        self
    }

    /// Show or hide the drag handle
    pub fn has_draggable_icon(mut self, show: bool) -> Self {
        self.config.has_draggable_icon = show;
        self
    }

    pub fn drag_icon_color(mut self, color: Color) -> Self {
        self.config.drag_icon_color = color;
        self
    }

    /// Set the wrapper tint
    pub fn background_color(mut self, color: Color) -> Self {
        self.config.background_color = Some(color);
        self
    }

    pub fn open_duration_ms(mut self, duration_ms: u32) -> Self {
        self.config.open_duration_ms = duration_ms;
        self
    }

    pub fn close_duration_ms(mut self, duration_ms: u32) -> Self {
        self.config.close_duration_ms = duration_ms;
        self
    }

    /// Set the callback run after the close animation completes
    pub fn on_close<F>(mut self, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_close = Some(Rc::new(callback));
        self
    }

    /// Set the content rendered inside the panel
    pub fn content<D>(self, content: D) -> BottomSheetBuilder<D> {
        BottomSheetBuilder {
            config: self.config,
            content,
            on_close: self.on_close,
            back_handlers: self.back_handlers,
            viewport: self.viewport,
        }
    }

    /// Use a specific back-handler registry instead of the thread's shared one
    pub fn back_handlers(mut self, registry: BackHandlerRegistry) -> Self {
        self.back_handlers = Some(registry);
        self
    }

    pub fn viewport(mut self, size: Size) -> Self {
        self.viewport = size;
        self
    }

    pub fn build(self) -> BottomSheet<C> {
        if self.config.height <= 0.0 {
            tracing::warn!(
                "BottomSheet: non-positive height {} will not render",
                self.config.height
            );
        }

        let inner = SheetInner {
            config: self.config,
            state: SheetState::Hidden,
            height: AnimatedValue::new(0.0),
            pan: AnimatedValueXY::new(Vec2::ZERO),
            drag: DragTracker::new(),
            backdrop_touch: None,
            height_animation: None,
            reopen_pending: false,
            back_subscription: None,
            viewport: self.viewport,
            on_close: self.on_close,
        };

        BottomSheet {
            inner: Rc::new(RefCell::new(inner)),
            content: Rc::new(self.content),
            back_handlers: self
                .back_handlers
                .unwrap_or_else(BackHandlerRegistry::current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use sheet_platform::BackDispatch;

    const FRAME_MS: f32 = 16.0;
    const VIEWPORT: Size = Size::new(400.0, 800.0);

    fn run_until_idle<C>(sheet: &BottomSheet<C>) {
        let mut frames = 0;
        while sheet.tick(FRAME_MS) {
            frames += 1;
            assert!(frames < 1000, "animations never settled");
        }
    }

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        (count, move || inner.set(inner.get() + 1))
    }

    fn sheet_with(registry: &BackHandlerRegistry) -> BottomSheetBuilder<()> {
        bottom_sheet(300.0)
            .viewport(VIEWPORT)
            .back_handlers(registry.clone())
    }

    fn open(sheet: &BottomSheet) {
        sheet.show();
        run_until_idle(sheet);
        assert_eq!(sheet.state(), SheetState::Open);
    }

    fn touch(sheet: &BottomSheet, event: TouchEvent) -> bool {
        sheet.handle_touch(&event)
    }

    fn drag(sheet: &BottomSheet, from_y: f32, to_y: f32) {
        assert!(touch(sheet, TouchEvent::Started { id: 1, x: 200.0, y: from_y }));
        assert!(touch(sheet, TouchEvent::Moved { id: 1, x: 200.0, y: to_y }));
        assert!(touch(sheet, TouchEvent::Ended { id: 1, x: 200.0, y: to_y }));
    }

    #[test]
    fn test_show_animates_to_target_height() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).build();
        assert!(sheet.frame().is_none());

        sheet.show();
        assert_eq!(sheet.state(), SheetState::Opening);
        assert!(sheet.is_visible());
        assert_eq!(sheet.height(), 0.0);

        assert!(sheet.tick(150.0));
        let midway = sheet.height();
        assert!(midway > 0.0 && midway < 300.0);

        run_until_idle(&sheet);
        assert_eq!(sheet.state(), SheetState::Open);
        assert_eq!(sheet.height(), 300.0);
        let frame = sheet.frame().unwrap();
        assert_eq!(frame.layout.panel.rect.height(), 300.0);
    }

    #[test]
    fn test_close_callback_runs_once_after_height_reaches_zero() {
        let registry = BackHandlerRegistry::new();
        let observed = Rc::new(RefCell::new(Vec::new()));
        let slot: Rc<RefCell<Option<BottomSheet>>> = Rc::new(RefCell::new(None));

        let observed_in_cb = Rc::clone(&observed);
        let slot_in_cb = Rc::clone(&slot);
        let sheet = sheet_with(&registry)
            .on_close(move || {
                if let Some(sheet) = slot_in_cb.borrow().as_ref() {
                    observed_in_cb
                        .borrow_mut()
                        .push((sheet.height(), sheet.is_visible(), sheet.pan()));
                }
            })
            .build();
        *slot.borrow_mut() = Some(sheet.clone());

        open(&sheet);
        sheet.close();
        assert_eq!(sheet.state(), SheetState::Closing);

        // Still animating: nothing fired yet
        sheet.tick(200.0);
        assert!(observed.borrow().is_empty());
        assert!(sheet.is_visible());

        run_until_idle(&sheet);
        assert_eq!(*observed.borrow(), vec![(0.0, false, Vec2::ZERO)]);
        assert!(sheet.frame().is_none());

        // Extra closes and ticks never re-fire
        sheet.close();
        run_until_idle(&sheet);
        assert_eq!(observed.borrow().len(), 1);

        slot.borrow_mut().take();
    }

    #[test]
    fn test_close_without_callback() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).build();
        open(&sheet);
        sheet.close();
        run_until_idle(&sheet);
        assert_eq!(sheet.state(), SheetState::Hidden);
        assert_eq!(sheet.pan(), Vec2::ZERO);
    }

    #[test]
    fn test_drag_past_threshold_dismisses() {
        let registry = BackHandlerRegistry::new();
        let (closed, on_close) = counter();
        let sheet = sheet_with(&registry).on_close(on_close).build();
        open(&sheet);

        // Panel spans y 500..800; threshold is 100
        assert!(touch(&sheet, TouchEvent::Started { id: 1, x: 200.0, y: 520.0 }));
        assert!(touch(&sheet, TouchEvent::Moved { id: 1, x: 200.0, y: 600.0 }));
        assert_eq!(sheet.pan(), Vec2::new(0.0, 80.0));
        assert!(touch(&sheet, TouchEvent::Ended { id: 1, x: 200.0, y: 640.0 }));

        assert_eq!(sheet.state(), SheetState::Closing);
        run_until_idle(&sheet);
        assert_eq!(sheet.state(), SheetState::Hidden);
        assert_eq!(sheet.pan(), Vec2::ZERO);
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_drag_within_threshold_springs_back() {
        let registry = BackHandlerRegistry::new();
        let (closed, on_close) = counter();
        let sheet = sheet_with(&registry).on_close(on_close).build();
        open(&sheet);

        // Exactly at the threshold does not dismiss
        drag(&sheet, 520.0, 620.0);
        assert_eq!(sheet.state(), SheetState::Open);
        assert!(sheet.is_animating());
        assert!(sheet.pan().y > 0.0);

        run_until_idle(&sheet);
        assert_eq!(sheet.pan(), Vec2::ZERO);
        assert_eq!(sheet.state(), SheetState::Open);
        assert_eq!(closed.get(), 0);
    }

    const HEIGHTS: [f32; 4] = [1.0, 97.0, 300.0, 843.0];
    const TALL_VIEWPORT: Size = Size::new(400.0, 1000.0);

    fn open_at(registry: &BackHandlerRegistry, height: f32) -> BottomSheet {
        let sheet = bottom_sheet(height)
            .viewport(TALL_VIEWPORT)
            .back_handlers(registry.clone())
            .build();
        open(&sheet);
        sheet
    }

    /// Drag from the middle of the panel by `distance`; returns the realized dy
    fn drag_by(sheet: &BottomSheet, distance: f32) -> f32 {
        let panel = sheet.layout().unwrap().panel.rect;
        let start = panel.y() + panel.height() / 2.0;
        let end = start + distance;
        assert!(touch(sheet, TouchEvent::Started { id: 1, x: 200.0, y: start }));
        assert!(touch(sheet, TouchEvent::Moved { id: 1, x: 200.0, y: end }));
        assert!(touch(sheet, TouchEvent::Ended { id: 1, x: 200.0, y: end }));
        end - start
    }

    #[test]
    fn test_show_reaches_height_for_uneven_heights() {
        for height in HEIGHTS {
            let registry = BackHandlerRegistry::new();
            let sheet = open_at(&registry, height);
            assert_eq!(sheet.height(), height, "height {height}");
            let panel = sheet.frame().unwrap().layout.panel.rect;
            assert_eq!(panel.height(), height);
            assert_eq!(panel.max_y(), TALL_VIEWPORT.height);
        }
    }

    #[test]
    fn test_dismiss_threshold_for_uneven_heights() {
        for height in HEIGHTS {
            let threshold = height / 3.0;

            let registry = BackHandlerRegistry::new();
            let sheet = open_at(&registry, height);
            drag_by(&sheet, threshold + 0.01);
            assert_eq!(sheet.state(), SheetState::Closing, "height {height}");
            run_until_idle(&sheet);
            assert_eq!(sheet.state(), SheetState::Hidden);

            let sheet = open_at(&registry, height);
            drag_by(&sheet, threshold - 0.01);
            run_until_idle(&sheet);
            assert_eq!(sheet.state(), SheetState::Open, "height {height}");
            assert_eq!(sheet.pan(), Vec2::ZERO);

            // At the boundary the realized displacement decides
            let sheet = open_at(&registry, height);
            let dy = drag_by(&sheet, threshold);
            let expected = if dy > threshold {
                SheetState::Closing
            } else {
                SheetState::Open
            };
            assert_eq!(sheet.state(), expected, "height {height}, dy {dy}");
        }
    }

    #[test]
    fn test_huge_frame_delta_settles() {
        let registry = BackHandlerRegistry::new();
        let (closed, on_close) = counter();
        let sheet = sheet_with(&registry).on_close(on_close).build();

        sheet.show();
        sheet.tick(f32::INFINITY);
        assert_eq!(sheet.state(), SheetState::Open);
        assert_eq!(sheet.height(), 300.0);

        // Spring back after a short drag, then a frame after a long suspend
        drag(&sheet, 520.0, 580.0);
        assert!(sheet.is_animating());
        assert!(!sheet.tick(1.0e9));
        assert_eq!(sheet.pan(), Vec2::ZERO);
        assert_eq!(sheet.state(), SheetState::Open);

        drag(&sheet, 520.0, 580.0);
        assert!(!sheet.tick(f32::INFINITY));
        assert_eq!(sheet.pan(), Vec2::ZERO);

        sheet.close();
        assert!(!sheet.tick(1.0e9));
        assert_eq!(sheet.state(), SheetState::Hidden);
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_upward_drag_is_not_applied() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).build();
        open(&sheet);

        assert!(touch(&sheet, TouchEvent::Started { id: 1, x: 200.0, y: 600.0 }));
        assert!(touch(&sheet, TouchEvent::Moved { id: 1, x: 200.0, y: 450.0 }));
        assert_eq!(sheet.pan(), Vec2::ZERO);
        assert!(touch(&sheet, TouchEvent::Ended { id: 1, x: 200.0, y: 450.0 }));
        assert_eq!(sheet.state(), SheetState::Open);
    }

    #[test]
    fn test_not_draggable_never_moves_or_closes() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).draggable(false).build();
        open(&sheet);

        assert!(touch(&sheet, TouchEvent::Started { id: 1, x: 200.0, y: 520.0 }));
        assert!(touch(&sheet, TouchEvent::Moved { id: 1, x: 200.0, y: 790.0 }));
        assert_eq!(sheet.pan(), Vec2::ZERO);
        assert!(touch(&sheet, TouchEvent::Ended { id: 1, x: 200.0, y: 790.0 }));

        run_until_idle(&sheet);
        assert_eq!(sheet.pan(), Vec2::ZERO);
        assert_eq!(sheet.state(), SheetState::Open);
    }

    #[test]
    fn test_cancelled_drag_springs_back() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).build();
        open(&sheet);

        touch(&sheet, TouchEvent::Started { id: 3, x: 200.0, y: 520.0 });
        touch(&sheet, TouchEvent::Moved { id: 3, x: 200.0, y: 780.0 });
        assert!(touch(&sheet, TouchEvent::Cancelled { id: 3 }));
        assert!(!sheet.is_dragging());

        run_until_idle(&sheet);
        assert_eq!(sheet.pan(), Vec2::ZERO);
        assert_eq!(sheet.state(), SheetState::Open);
    }

    #[test]
    fn test_backdrop_tap_closes() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).build();
        open(&sheet);

        assert!(touch(&sheet, TouchEvent::Started { id: 9, x: 200.0, y: 100.0 }));
        assert_eq!(sheet.state(), SheetState::Open);
        assert!(touch(&sheet, TouchEvent::Ended { id: 9, x: 205.0, y: 110.0 }));
        assert_eq!(sheet.state(), SheetState::Closing);
    }

    #[test]
    fn test_backdrop_press_released_on_panel_does_not_close() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).build();
        open(&sheet);

        touch(&sheet, TouchEvent::Started { id: 9, x: 200.0, y: 100.0 });
        touch(&sheet, TouchEvent::Ended { id: 9, x: 200.0, y: 700.0 });
        assert_eq!(sheet.state(), SheetState::Open);
    }

    #[test]
    fn test_hidden_sheet_consumes_nothing() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).build();
        assert!(!touch(&sheet, TouchEvent::Started { id: 1, x: 200.0, y: 700.0 }));
        assert!(!sheet.handle_event(&HostEvent::BackPressed));
    }

    #[test]
    fn test_overlay_touches_above_wrapper_fall_through() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).use_modal(false).build();
        open(&sheet);
        assert!(!touch(&sheet, TouchEvent::Started { id: 1, x: 200.0, y: 100.0 }));
        assert!(touch(&sheet, TouchEvent::Started { id: 2, x: 200.0, y: 700.0 }));
    }

    #[test]
    fn test_overlay_registers_and_releases_back_interceptor() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).use_modal(false).build();
        assert!(registry.is_empty());

        sheet.show();
        assert!(sheet.has_back_interceptor());
        assert_eq!(registry.len(), 1);

        run_until_idle(&sheet);
        sheet.close();
        assert!(registry.is_empty());
        run_until_idle(&sheet);
        assert!(registry.is_empty());
        assert!(!sheet.has_back_interceptor());
    }

    #[test]
    fn test_overlay_back_press_closes() {
        let registry = BackHandlerRegistry::new();
        let (closed, on_close) = counter();
        let sheet = sheet_with(&registry)
            .use_modal(false)
            .on_close(on_close)
            .build();
        open(&sheet);

        assert!(!sheet.handle_event(&HostEvent::BackPressed));
        assert_eq!(registry.dispatch(), BackDispatch::Handled);
        assert_eq!(sheet.state(), SheetState::Closing);
        assert!(registry.is_empty());

        run_until_idle(&sheet);
        assert_eq!(closed.get(), 1);
        assert_eq!(registry.dispatch(), BackDispatch::Unhandled);
    }

    #[test]
    fn test_modal_never_registers_interceptor() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).build();
        sheet.show();
        assert!(registry.is_empty());
        run_until_idle(&sheet);
        assert!(registry.is_empty());

        // The native modal turns back presses into dismiss requests
        assert!(sheet.handle_event(&HostEvent::BackPressed));
        assert_eq!(sheet.state(), SheetState::Closing);
        run_until_idle(&sheet);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_drop_while_open_releases_interceptor() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).use_modal(false).build();
        sheet.show();
        assert_eq!(registry.len(), 1);
        drop(sheet);
        assert!(registry.is_empty());
        assert_eq!(registry.dispatch(), BackDispatch::Unhandled);
    }

    #[test]
    fn test_reopen_starts_from_rest() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).build();
        open(&sheet);

        // Leave the panel mid-drag, then close programmatically
        touch(&sheet, TouchEvent::Started { id: 1, x: 200.0, y: 520.0 });
        touch(&sheet, TouchEvent::Moved { id: 1, x: 200.0, y: 580.0 });
        assert_eq!(sheet.pan().y, 60.0);
        sheet.close();
        run_until_idle(&sheet);

        sheet.show();
        assert_eq!(sheet.height(), 0.0);
        assert_eq!(sheet.pan(), Vec2::ZERO);
        assert!(!sheet.is_dragging());
        run_until_idle(&sheet);
        assert_eq!(sheet.height(), 300.0);
    }

    #[test]
    fn test_close_during_opening_hides_from_current_height() {
        let registry = BackHandlerRegistry::new();
        let (closed, on_close) = counter();
        let sheet = sheet_with(&registry).on_close(on_close).build();
        sheet.show();
        sheet.tick(150.0);
        let partial = sheet.height();

        sheet.close();
        assert_eq!(sheet.state(), SheetState::Closing);
        sheet.tick(FRAME_MS);
        assert!(sheet.height() <= partial);

        run_until_idle(&sheet);
        assert_eq!(sheet.state(), SheetState::Hidden);
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_show_while_open_is_ignored() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).use_modal(false).build();
        open(&sheet);
        sheet.show();
        assert_eq!(sheet.state(), SheetState::Open);
        assert!(!sheet.is_animating());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_show_while_closing_reopens_after_cleanup() {
        let registry = BackHandlerRegistry::new();
        let (closed, on_close) = counter();
        let sheet = sheet_with(&registry)
            .use_modal(false)
            .on_close(on_close)
            .build();
        open(&sheet);

        sheet.close();
        sheet.tick(100.0);
        sheet.show();
        assert_eq!(sheet.state(), SheetState::Closing);

        // Run the close to completion: callback fires, then reopen begins
        let mut frames = 0;
        while sheet.state() == SheetState::Closing {
            sheet.tick(FRAME_MS);
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(closed.get(), 1);
        assert_eq!(sheet.state(), SheetState::Opening);
        assert_eq!(sheet.height(), 0.0);
        assert_eq!(registry.len(), 1);

        run_until_idle(&sheet);
        assert_eq!(sheet.state(), SheetState::Open);
        assert_eq!(sheet.height(), 300.0);
    }

    #[test]
    fn test_close_cancels_queued_reopen() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).build();
        open(&sheet);

        sheet.close();
        sheet.show();
        sheet.close();
        run_until_idle(&sheet);
        assert_eq!(sheet.state(), SheetState::Hidden);
    }

    #[test]
    fn test_callback_may_reopen_sheet() {
        let registry = BackHandlerRegistry::new();
        let slot: Rc<RefCell<Option<BottomSheet>>> = Rc::new(RefCell::new(None));
        let slot_in_cb = Rc::clone(&slot);
        let sheet = sheet_with(&registry)
            .on_close(move || {
                if let Some(sheet) = slot_in_cb.borrow_mut().take() {
                    sheet.show();
                }
            })
            .build();
        *slot.borrow_mut() = Some(sheet.clone());

        open(&sheet);
        sheet.close();
        run_until_idle(&sheet);
        assert_eq!(sheet.state(), SheetState::Open);
        assert_eq!(sheet.height(), 300.0);
    }

    #[test]
    fn test_request_dismiss_closes() {
        let registry = BackHandlerRegistry::new();
        let sheet = sheet_with(&registry).build();
        open(&sheet);
        sheet.request_dismiss();
        assert_eq!(sheet.state(), SheetState::Closing);
    }

    #[test]
    fn test_frame_carries_content_and_events_route() {
        let registry = BackHandlerRegistry::new();
        let sheet = bottom_sheet(200.0)
            .back_handlers(registry)
            .has_draggable_icon(true)
            .content(String::from("Share"))
            .build();

        assert!(!sheet.handle_event(&HostEvent::Resized(VIEWPORT)));
        sheet.show();
        while sheet.handle_event(&HostEvent::Frame { dt_ms: FRAME_MS }) {}

        let frame = sheet.frame().unwrap();
        assert_eq!(frame.content.as_str(), "Share");
        assert_eq!(sheet.content(), "Share");
        assert_eq!(frame.layout.panel.rect.y(), 600.0);
        assert!(frame.layout.drag_icon.is_some());
    }
}
