//! CFL-like stability bound for the damped wave integrator.
//!
//! For a frame delta `dt` the integrator stays bounded while
//! `acceleration <= (0.5 / dt)²` and `damping <= 2 / dt`.
//! The surface itself never enforces this.

use crate::error::{Result, SurfaceError};
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityBound {
    pub delta: f32,
    pub max_acceleration: f32,
    pub max_damping: f32,
}

impl StabilityBound {
    pub fn for_delta(delta: f32) -> Result<Self> {
        if !delta.is_finite() || delta <= 0.0 {
            return Err(SurfaceError::InvalidDelta(delta));
        }
        let half_rate = 0.5 / delta;
        Ok(Self {
            delta,
            max_acceleration: half_rate * half_rate,
            max_damping: 2.0 / delta,
        })
    }

    pub fn allows(&self, acceleration: f32, damping: f32) -> bool {
        acceleration <= self.max_acceleration && damping <= self.max_damping
    }
}

/// Validates `acceleration` and `damping` against the bound for `delta`.
pub fn check_stability(acceleration: f32, damping: f32, delta: f32) -> Result<StabilityBound> {
    let bound = StabilityBound::for_delta(delta)?;
    if bound.allows(acceleration, damping) {
        return Ok(bound);
    }

    warn!(
        "coefficients exceed stability bound at delta {}: acceleration {} > {} or damping {} > {}",
        delta, acceleration, bound.max_acceleration, damping, bound.max_damping
    );
    Err(SurfaceError::Unstable {
        acceleration,
        damping,
        delta,
        max_acceleration: bound.max_acceleration,
        max_damping: bound.max_damping,
    })
}
