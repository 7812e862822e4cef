//! Sheet Animation
//!
//! The animation primitives the bottom sheet is driven by.
//!
//! # Features
//!
//! - **Easing**: standard curves plus arbitrary cubic béziers
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Tweens**: fixed-duration interpolation for any `Interpolate` type
//! - **Animated Values**: scalar and 2D values that own at most one running
//!   animation and report completion (finished or interrupted) from `tick`
//!
//! Nothing here reads a wall clock. The host advances animations by calling
//! `tick(dt_ms)` once per frame, which keeps every animation deterministic.

pub mod animated;
pub mod easing;
pub mod spring;
pub mod values;

pub use animated::{AnimatedValue, AnimatedValueXY, AnimationId, Completion};
pub use easing::Easing;
pub use spring::{Spring, SpringConfig};
pub use values::{Interpolate, Tween};
