//! Spring physics animation
//!
//! RK4-integrated spring physics for animations without a fixed duration.
//! The sheet uses a spring to return the drag offset to rest after a release
//! that does not dismiss.

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Convert Origami-style tension/friction into stiffness/damping
    ///
    /// Mobile hosts commonly describe springs this way; the conversion keeps
    /// the feel identical to the platform's own spring driver.
    pub fn from_tension_friction(tension: f32, friction: f32) -> Self {
        Self {
            stiffness: (tension - 30.0) * 3.62 + 194.0,
            damping: (friction - 8.0) * 3.0 + 25.0,
            mass: 1.0,
        }
    }

    /// The platform default spring (tension 40, friction 7)
    ///
    /// Used for the drag spring-back.
    pub fn platform_default() -> Self {
        Self::from_tension_friction(40.0, 7.0)
    }

    /// A gentle, slow spring
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// A stiff, snappy spring
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::platform_default()
    }
}

/// A spring-based animator
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Largest integration step; longer frames are subdivided
    const MAX_STEP: f32 = 1.0 / 60.0;
    /// Longest frame simulated step by step, in seconds
    const MAX_ADVANCE: f32 = 10.0;

    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Check if the spring has settled (within epsilon of target with minimal velocity)
    pub fn is_settled(&self) -> bool {
        // Within half a pixel and under 5px/s is imperceptible
        const EPSILON: f32 = 0.5;
        const VELOCITY_EPSILON: f32 = 5.0;

        (self.value - self.target).abs() < EPSILON && self.velocity.abs() < VELOCITY_EPSILON
    }

    /// Advance the simulation by `dt` seconds, subdividing long frames
    ///
    /// Frames longer than `MAX_ADVANCE` (or infinite) jump straight to rest.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        if dt > Self::MAX_ADVANCE {
            self.snap_to_target();
            return;
        }

        let steps = (dt / Self::MAX_STEP).ceil() as u32;
        if steps > 0 {
            let step = dt / steps as f32;
            for _ in 0..steps {
                if self.is_settled() {
                    break;
                }
                self.step(step);
            }
        }
        if self.is_settled() {
            self.snap_to_target();
        }
    }

    fn snap_to_target(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }

    /// Step the spring simulation using RK4 integration
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.snap_to_target();
            return;
        }

        let k1_v = self.acceleration(self.value, self.velocity);
        let k1_x = self.velocity;

        let k2_v = self.acceleration(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let k2_x = self.velocity + k1_v * dt * 0.5;

        let k3_v = self.acceleration(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let k3_x = self.velocity + k2_v * dt * 0.5;

        let k4_v = self.acceleration(self.value + k3_x * dt, self.velocity + k3_v * dt);
        let k4_x = self.velocity + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}
