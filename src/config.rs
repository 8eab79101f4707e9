use crate::error::{Error, Result};

/// Upper bound on `t_final / dt`.
pub const MAX_STEPS: usize = 100_000_000;

// ---------------------------------------------------------------------------
// Simulation configuration
// ---------------------------------------------------------------------------

/// Physical and numerical parameters for one pendulum run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumConfig {
    pub g: f64,       // gravitational acceleration, m/s^2
    pub l: f64,       // rod length, m
    pub theta_0: f64, // release angle from the downward vertical, degrees
    pub t_final: f64, // simulated duration, s
    pub dt: f64,      // integration timestep, s
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            g: 9.81,
            l: 1.0,
            theta_0: 40.0,
            t_final: 16.5,
            dt: 0.005, // 200 Hz
        }
    }
}

impl PendulumConfig {
    pub fn with_gravity(mut self, g: f64) -> Self {
        self.g = g;
        self
    }

    pub fn with_length(mut self, l: f64) -> Self {
        self.l = l;
        self
    }

    pub fn with_theta_0(mut self, theta_0: f64) -> Self {
        self.theta_0 = theta_0;
        self
    }

    pub fn with_t_final(mut self, t_final: f64) -> Self {
        self.t_final = t_final;
        self
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Reject configurations that would divide by zero or run a
    /// meaningless loop.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        positive("l", self.l)?;
        positive("dt", self.dt)?;
        positive("t_final", self.t_final)?;
        finite("g", self.g)?;
        finite("theta_0", self.theta_0)?;

        let ratio = self.t_final / self.dt;
        if !ratio.is_finite() || ratio > MAX_STEPS as f64 {
            return Err(Error::invalid("dt", self.dt, "too small for t_final"));
        }
        Ok(())
    }

    /// Number of RK4 steps: `floor(t_final / dt)`.
    ///
    /// The last sample lands on `n_steps * dt`, which may fall short of
    /// `t_final` when the ratio is not integral. Only meaningful after
    /// [`validate`](Self::validate) has passed.
    pub fn n_steps(&self) -> usize {
        (self.t_final / self.dt) as usize
    }

    /// Release angle in radians.
    pub fn theta_0_rad(&self) -> f64 {
        self.theta_0 * (std::f64::consts::PI / 180.0)
    }

    /// Squared small-angle natural frequency, g/l.
    pub fn omega_sq(&self) -> f64 {
        self.g / self.l
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(Error::invalid(name, value, "must be positive"));
    }
    Ok(())
}

fn finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid(name, value, "must be finite"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
