//! Animated values
//!
//! An `AnimatedValue` holds a current value and at most one running animation
//! (a timed [`Tween`] or a [`Spring`]). Starting a new animation, setting the
//! value directly, or stopping interrupts the running one.
//!
//! Every animation gets an [`AnimationId`] when started. When it ends the
//! value queues a [`Completion`]: `finished: true` if it reached its target,
//! `false` if it was interrupted. Owners drain completions after `tick` and
//! match ids to decide what to do next.
//!
//! ```rust
//! use sheet_animation::{AnimatedValue, Easing};
//!
//! let mut height = AnimatedValue::new(0.0);
//! let id = height.animate_to(320.0, 300, Easing::EaseInOut);
//!
//! while height.tick(16.0) {}
//!
//! assert_eq!(height.get(), 320.0);
//! let done = height.take_completions();
//! assert_eq!(done.len(), 1);
//! assert_eq!(done[0].id, id);
//! assert!(done[0].finished);
//! ```

use sheet_core::Vec2;

use crate::easing::Easing;
use crate::spring::{Spring, SpringConfig};
use crate::values::Tween;

/// Identifies one started animation on a value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

/// Outcome of an animation that is no longer running
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    pub id: AnimationId,
    /// `true` if the animation reached its target, `false` if interrupted
    pub finished: bool,
}

#[derive(Clone, Debug)]
enum Driver {
    Timing(Tween<f32>),
    Spring(Spring),
}

#[derive(Clone, Debug)]
struct Running {
    id: AnimationId,
    driver: Driver,
}

/// A scalar value that can be animated
#[derive(Clone, Debug)]
pub struct AnimatedValue {
    value: f32,
    running: Option<Running>,
    next_id: u64,
    completions: Vec<Completion>,
}

impl AnimatedValue {
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial,
            running: None,
            next_id: 1,
            completions: Vec::new(),
        }
    }

    /// Get the current value
    pub fn get(&self) -> f32 {
        self.value
    }

    pub fn is_animating(&self) -> bool {
        self.running.is_some()
    }

    /// Start a timed animation from the current value to `to`
    pub fn animate_to(&mut self, to: f32, duration_ms: u32, easing: Easing) -> AnimationId {
        let tween = Tween::new(self.value, to, duration_ms, easing);
        self.start(Driver::Timing(tween))
    }

    /// Start a spring animation from the current value to `to`
    pub fn spring_to(&mut self, to: f32, config: SpringConfig) -> AnimationId {
        let mut spring = Spring::new(config, self.value);
        spring.set_target(to);
        self.start(Driver::Spring(spring))
    }

    /// Set the value immediately, interrupting any running animation
    pub fn set_value(&mut self, value: f32) {
        self.stop();
        self.value = value;
    }

    /// Stop the running animation where it is
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            tracing::trace!(
                "AnimatedValue: {:?} interrupted at {:.2}",
                running.id,
                self.value
            );
            self.completions.push(Completion {
                id: running.id,
                finished: false,
            });
        }
    }

    /// Return to a canonical idle state holding `value`
    ///
    /// Unlike [`set_value`](Self::set_value) this discards the running
    /// animation and any queued completions without reporting them. Ids
    /// keep increasing so stale ids never match a later animation.
    pub fn reset(&mut self, value: f32) {
        self.running = None;
        self.completions.clear();
        self.value = value;
    }

    /// Advance the running animation by `dt_ms`; returns whether it is still running
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let Some(running) = self.running.as_mut() else {
            return false;
        };

        let done = match &mut running.driver {
            Driver::Timing(tween) => {
                tween.tick(dt_ms);
                self.value = tween.value();
                tween.is_finished()
            }
            Driver::Spring(spring) => {
                spring.advance(dt_ms / 1000.0);
                self.value = spring.value();
                spring.is_settled()
            }
        };

        if done {
            let id = running.id;
            self.running = None;
            tracing::trace!("AnimatedValue: {:?} finished at {:.2}", id, self.value);
            self.completions.push(Completion { id, finished: true });
        }
        !done
    }

    /// Drain queued completions, oldest first
    pub fn take_completions(&mut self) -> Vec<Completion> {
        std::mem::take(&mut self.completions)
    }

    fn start(&mut self, driver: Driver) -> AnimationId {
        self.stop();
        let id = self.allocate_id();
        tracing::trace!("AnimatedValue: {:?} started from {:.2}", id, self.value);
        self.running = Some(Running { id, driver });
        id
    }

    fn allocate_id(&mut self) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// A 2D value animated as one unit
///
/// The x and y components run side by side; a group animation completes when
/// both components have settled.
#[derive(Clone, Debug, Default)]
pub struct AnimatedValueXY {
    x: AnimatedValue,
    y: AnimatedValue,
    group: Option<AnimationId>,
    next_id: u64,
    completions: Vec<Completion>,
}

impl AnimatedValueXY {
    pub fn new(initial: Vec2) -> Self {
        Self {
            x: AnimatedValue::new(initial.x),
            y: AnimatedValue::new(initial.y),
            group: None,
            next_id: 1,
            completions: Vec::new(),
        }
    }

    pub fn get(&self) -> Vec2 {
        Vec2::new(self.x.get(), self.y.get())
    }

    pub fn is_animating(&self) -> bool {
        self.group.is_some()
    }

    /// Set both components immediately, interrupting any running animation
    pub fn set_value(&mut self, value: Vec2) {
        self.interrupt();
        self.x.set_value(value.x);
        self.y.set_value(value.y);
        self.discard_component_completions();
    }

    /// Set only the y component, interrupting any running animation
    pub fn set_y(&mut self, y: f32) {
        self.interrupt();
        self.x.stop();
        self.y.set_value(y);
        self.discard_component_completions();
    }

    /// Spring both components to `to`
    pub fn spring_to(&mut self, to: Vec2, config: SpringConfig) -> AnimationId {
        self.interrupt();
        self.x.spring_to(to.x, config);
        self.y.spring_to(to.y, config);
        self.discard_component_completions();

        let id = AnimationId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.group = Some(id);
        id
    }

    /// Return to a canonical idle state holding `value` without reporting
    pub fn reset(&mut self, value: Vec2) {
        self.x.reset(value.x);
        self.y.reset(value.y);
        self.group = None;
        self.completions.clear();
    }

    /// Advance both components; returns whether the group is still running
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let x_running = self.x.tick(dt_ms);
        let y_running = self.y.tick(dt_ms);
        self.discard_component_completions();

        if let Some(id) = self.group {
            if !x_running && !y_running {
                self.group = None;
                self.completions.push(Completion { id, finished: true });
            }
        }
        self.group.is_some()
    }

    pub fn take_completions(&mut self) -> Vec<Completion> {
        std::mem::take(&mut self.completions)
    }

    fn interrupt(&mut self) {
        if let Some(id) = self.group.take() {
            self.completions.push(Completion {
                id,
                finished: false,
            });
        }
    }

    fn discard_component_completions(&mut self) {
        self.x.take_completions();
        self.y.take_completions();
    }
}
