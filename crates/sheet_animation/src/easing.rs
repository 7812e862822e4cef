//! Easing curves for timed animations

/// Easing function applied to tween progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Slow start: cubic bézier (0.42, 0, 1, 1)
    EaseIn,
    /// Slow end: cubic bézier (0, 0, 0.58, 1)
    EaseOut,
    /// Symmetric ease: `EaseIn` mirrored around the midpoint.
    ///
    /// This is the default curve for timed animations on mobile hosts.
    #[default]
    EaseInOut,
    /// Arbitrary CSS-style cubic bézier with control points (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Map linear progress `t` in `0.0..=1.0` to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    Easing::EaseIn.apply(t * 2.0) / 2.0
                } else {
                    1.0 - Easing::EaseIn.apply((1.0 - t) * 2.0) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn bezier_component(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Evaluate a cubic bézier easing at horizontal position `x`
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 || x >= 1.0 {
        return x;
    }

    // Newton-Raphson on the x polynomial, then bisection if the slope vanishes
    let mut s = x;
    for _ in 0..8 {
        let err = bezier_component(x1, x2, s) - x;
        if err.abs() < 1e-5 {
            return bezier_component(y1, y2, s);
        }
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let value = bezier_component(x1, x2, s);
        if (value - x).abs() < 1e-5 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier_component(y1, y2, s)
}
