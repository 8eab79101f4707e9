use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// Pendulum state: angle and angular rate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub time: f64,      // s
    pub theta: f64,     // rad, measured from the downward vertical
    pub theta_dot: f64, // rad/s
}

impl State {
    /// Released from rest at `theta` radians, t = 0.
    pub fn at_rest(theta: f64) -> Self {
        Self {
            time: 0.0,
            theta,
            theta_dot: 0.0,
        }
    }

    /// Advance by a derivative scaled by `h` (used inside RK4).
    pub fn apply(&self, d: &Deriv, h: f64) -> State {
        State {
            time: self.time + h,
            theta: self.theta + d.dtheta * h,
            theta_dot: self.theta_dot + d.dtheta_dot * h,
        }
    }

    /// Bob position relative to the pivot, y up. The bob hangs at (0, -l).
    pub fn bob_position(&self, l: f64) -> Vector2<f64> {
        Vector2::new(l * self.theta.sin(), -l * self.theta.cos())
    }
}

// ---------------------------------------------------------------------------
// State derivative (dtheta/dt, dtheta_dot/dt)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deriv {
    pub dtheta: f64,     // angular velocity
    pub dtheta_dot: f64, // angular acceleration
}
