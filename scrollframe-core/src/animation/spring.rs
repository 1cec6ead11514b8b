//! Spring smoothing between raw scroll progress and the value that drives frame selection.
//!
//! The oscillator is solved in closed form for each step, so the result does not depend on
//! how a caller slices time into ticks.

use std::time::Duration;

use crate::foundation::error::{ScrollframeError, ScrollframeResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Physical parameters of a damped spring.
pub struct SpringParams {
    /// Spring constant `k`.
    pub stiffness: f64,
    /// Damping coefficient `c`.
    pub damping: f64,
    /// Mass `m`.
    pub mass: f64,
    /// Distance from target below which the spring may come to rest.
    pub rest_delta: f64,
    /// Speed below which the spring may come to rest.
    pub rest_speed: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 40.0,
            mass: 1.0,
            rest_delta: 0.001,
            rest_speed: 0.01,
        }
    }
}

impl SpringParams {
    /// Reject non-positive stiffness/mass and negative damping/rest thresholds.
    pub fn validate(&self) -> ScrollframeResult<()> {
        let positive = [("stiffness", self.stiffness), ("mass", self.mass)];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(ScrollframeError::validation(format!(
                    "spring {name} must be finite and > 0, got {v}"
                )));
            }
        }
        let non_negative = [
            ("damping", self.damping),
            ("rest_delta", self.rest_delta),
            ("rest_speed", self.rest_speed),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(ScrollframeError::validation(format!(
                    "spring {name} must be finite and >= 0, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Undamped angular frequency `sqrt(k/m)`.
    pub fn omega(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio `c / (2 * sqrt(k*m))`; 1.0 is critical.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

#[derive(Clone, Debug)]
/// Spring-smoothed scalar that chases a target.
pub struct Spring {
    params: SpringParams,
    position: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    /// Start at rest on `initial`.
    pub fn new(params: SpringParams, initial: f64) -> Self {
        Self {
            params,
            position: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    /// Current smoothed value.
    pub fn value(&self) -> f64 {
        self.position
    }

    /// Current velocity (units per second).
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Value the spring is moving towards.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Change the target; velocity is preserved.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Teleport to `value` and stop.
    pub fn jump_to(&mut self, value: f64) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// True once position and velocity have settled on the target.
    pub fn is_at_rest(&self) -> bool {
        self.position == self.target && self.velocity == 0.0
    }

    /// Advance by `dt`. Returns true if the value changed.
    pub fn step(&mut self, dt: Duration) -> bool {
        if self.is_at_rest() {
            return false;
        }
        let before = self.position;
        let t = dt.as_secs_f64();

        let x0 = self.position - self.target;
        let v0 = self.velocity;
        let w0 = self.params.omega();
        let zeta = self.params.damping_ratio();

        let (x, v) = if (zeta - 1.0).abs() < 1e-6 {
            let c2 = v0 + w0 * x0;
            let e = (-w0 * t).exp();
            ((x0 + c2 * t) * e, (c2 - w0 * (x0 + c2 * t)) * e)
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let e = (-zeta * w0 * t).exp();
            let (sin, cos) = (wd * t).sin_cos();
            let x = e * (x0 * cos + ((v0 + zeta * w0 * x0) / wd) * sin);
            let v = e * (v0 * cos - ((zeta * w0 * v0 + w0 * w0 * x0) / wd) * sin);
            (x, v)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            let a = (v0 - r2 * x0) / (r1 - r2);
            let b = x0 - a;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (a * e1 + b * e2, r1 * a * e1 + r2 * b * e2)
        };

        self.position = self.target + x;
        self.velocity = v;

        if x.abs() <= self.params.rest_delta && v.abs() <= self.params.rest_speed {
            self.position = self.target;
            self.velocity = 0.0;
        }

        self.position != before
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
