//! Spring physics.
//!
//! Springs are specified the way Jetpack Compose's `spring()` builder does
//! it, as a (damping ratio, stiffness) pair, and simulated with semi-implicit
//! Euler integration.

/// Parameters describing a spring's motion.
///
/// The stiffness and damping-ratio constants match the platform values the
/// demo relies on (`Spring.StiffnessLow` and friends), so a spec built from
/// [`SpringSpec::STIFFNESS_LOW`] produces the same soft, slightly lagging
/// motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Spring stiffness. Higher values reach the target faster.
    pub stiffness: f32,
    /// Damping ratio. 1.0 is critically damped (no overshoot).
    pub damping_ratio: f32,
}

impl SpringSpec {
    pub const STIFFNESS_HIGH: f32 = 10_000.0;
    pub const STIFFNESS_MEDIUM: f32 = 1_500.0;
    pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;
    pub const STIFFNESS_LOW: f32 = 200.0;
    pub const STIFFNESS_VERY_LOW: f32 = 50.0;

    pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;
    pub const DAMPING_RATIO_LOW_BOUNCY: f32 = 0.75;
    pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;
    pub const DAMPING_RATIO_HIGH_BOUNCY: f32 = 0.2;

    /// Critically damped spring with the given stiffness.
    pub const fn with_stiffness(stiffness: f32) -> Self {
        Self {
            stiffness,
            damping_ratio: Self::DAMPING_RATIO_NO_BOUNCY,
        }
    }

    /// Soft, critically damped spring. The motion `AnimatedText` uses.
    pub const fn low_stiffness() -> Self {
        Self::with_stiffness(Self::STIFFNESS_LOW)
    }

    /// Damping coefficient for unit mass: `ratio * 2 * sqrt(stiffness)`.
    pub fn damping(&self) -> f32 {
        self.damping_ratio * 2.0 * self.stiffness.sqrt()
    }

    /// Whether the spring can overshoot its target.
    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio < 1.0
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::with_stiffness(Self::STIFFNESS_MEDIUM)
    }
}

/// A spring-animated scalar value.
#[derive(Debug, Clone)]
pub struct Spring {
    value: f32,
    target: f32,
    velocity: f32,
    spec: SpringSpec,
    at_rest: bool,
    /// Displacement/velocity threshold for settling.
    precision: f32,
}

impl Spring {
    /// Creates a spring resting at `initial`.
    pub fn new(initial: f32, spec: SpringSpec) -> Self {
        Self {
            value: initial,
            target: initial,
            velocity: 0.0,
            spec,
            at_rest: true,
            precision: 0.001,
        }
    }

    /// Retargets the spring, keeping the current value and velocity.
    ///
    /// This is what makes transition interruption seamless: a superseded
    /// animation continues from wherever it was.
    pub fn set_target(&mut self, target: f32) {
        if (self.target - target).abs() > f32::EPSILON {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Swaps the motion parameters mid-flight. Value and velocity carry over.
    pub fn set_spec(&mut self, spec: SpringSpec) {
        self.spec = spec;
    }

    /// Jumps to `value` without animating.
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Advances the simulation by `dt` seconds and returns the new value.
    pub fn tick(&mut self, dt: f32) -> f32 {
        if self.at_rest {
            return self.value;
        }

        // F = -k * x - c * v, unit mass.
        let displacement = self.value - self.target;
        let acceleration =
            -self.spec.stiffness * displacement - self.spec.damping() * self.velocity;

        // Semi-implicit Euler.
        self.velocity += acceleration * dt;
        self.value += self.velocity * dt;

        let displacement = self.value - self.target;
        if displacement.abs() < self.precision && self.velocity.abs() < self.precision {
            self.value = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
        self.value
    }
}
