//! Animatable value types
//!
//! Linear interpolation for the value types the sheet animates, and a
//! fixed-duration tween built on it.

use sheet_core::Vec2;

use crate::easing::Easing;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Vec2 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec2::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// A fixed-duration interpolation from one value to another
#[derive(Clone, Debug)]
pub struct Tween<T: Interpolate> {
    from: T,
    to: T,
    duration_ms: u32,
    elapsed_ms: f32,
    easing: Easing,
}

impl<T: Interpolate> Tween<T> {
    pub fn new(from: T, to: T, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            elapsed_ms: 0.0,
            easing,
        }
    }

    /// Advance by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.duration_ms as f32);
    }

    /// Get progress (0.0 to 1.0) before easing
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Current interpolated value
    pub fn value(&self) -> T {
        if self.is_finished() {
            return self.to.clone();
        }
        self.from.lerp(&self.to, self.easing.apply(self.progress()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_tween_midpoint() {
        let mut tween = Tween::new(0.0_f32, 300.0, 300, Easing::Linear);
        tween.tick(150.0);
        assert!((tween.value() - 150.0).abs() < 1e-3);
        assert!(!tween.is_finished());
    }

    #[test]
    fn test_tween_lands_exactly_on_target() {
        let mut tween = Tween::new(412.5_f32, 0.0, 400, Easing::EaseInOut);
        for _ in 0..30 {
            tween.tick(16.0);
        }
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn test_zero_duration_is_immediately_finished() {
        let tween = Tween::new(Vec2::ZERO, Vec2::new(3.0, 4.0), 0, Easing::Linear);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_vec2_lerp() {
        let v = Vec2::new(0.0, 10.0).lerp(&Vec2::new(10.0, 0.0), 0.25);
        assert_eq!(v, Vec2::new(2.5, 7.5));
    }
}
