use super::state::{Deriv, State};

// ---------------------------------------------------------------------------
// Equations of motion
// ---------------------------------------------------------------------------

/// Right-hand side of the simple pendulum as a first-order system:
///
/// ```text
/// d(theta)/dt     = theta_dot
/// d(theta_dot)/dt = -(g/l) sin(theta)
/// ```
///
/// `omega_sq` is g/l.
pub fn derivatives(state: &State, omega_sq: f64) -> Deriv {
    Deriv {
        dtheta: state.theta_dot,
        dtheta_dot: -omega_sq * state.theta.sin(),
    }
}

/// Mechanical energy per unit mass per l^2: `0.5 theta_dot^2 - (g/l) cos theta`.
///
/// Conserved by the exact dynamics, so its drift measures integration error.
pub fn specific_energy(theta: f64, theta_dot: f64, omega_sq: f64) -> f64 {
    0.5 * theta_dot * theta_dot - omega_sq * theta.cos()
}

/// Small-angle period, 2*pi*sqrt(l/g).
pub fn small_angle_period(g: f64, l: f64) -> f64 {
    2.0 * std::f64::consts::PI * (l / g).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn no_acceleration_at_bottom() {
        let d = derivatives(&State::at_rest(0.0), 9.81);
        assert_abs_diff_eq!(d.dtheta, 0.0);
        assert_abs_diff_eq!(d.dtheta_dot, 0.0);
    }

    #[test]
    fn restoring_torque_opposes_displacement() {
        let right = derivatives(&State::at_rest(0.3), 9.81);
        let left = derivatives(&State::at_rest(-0.3), 9.81);
        assert!(right.dtheta_dot < 0.0);
        assert!(left.dtheta_dot > 0.0);
        assert_abs_diff_eq!(right.dtheta_dot, -left.dtheta_dot);
    }

    #[test]
    fn angle_rate_passes_through() {
        let s = State { time: 0.0, theta: 0.1, theta_dot: 2.5 };
        assert_abs_diff_eq!(derivatives(&s, 4.0).dtheta, 2.5);
    }

    #[test]
    fn energy_at_rest_bottom_is_minimum() {
        assert_abs_diff_eq!(specific_energy(0.0, 0.0, 9.81), -9.81);
        assert!(specific_energy(0.2, 0.0, 9.81) > -9.81);
        assert!(specific_energy(0.0, 0.5, 9.81) > -9.81);
    }

    #[test]
    fn small_angle_period_one_metre() {
        assert_abs_diff_eq!(small_angle_period(9.81, 1.0), 2.006_067, epsilon = 1e-6);
    }
}
