use crate::dynamics;
use crate::dynamics::state::State;

// ---------------------------------------------------------------------------
// Classical 4th-order Runge-Kutta integrator
// ---------------------------------------------------------------------------

/// Single RK4 step: advance state by dt.
///
/// Time is accumulated as `state.time + dt`, so after n steps it carries the
/// rounding of n additions rather than `n * dt`.
pub fn rk4_step(state: &State, omega_sq: f64, dt: f64) -> State {
    let k1 = dynamics::derivatives(state, omega_sq);
    let k2 = dynamics::derivatives(&state.apply(&k1, dt * 0.5), omega_sq);
    let k3 = dynamics::derivatives(&state.apply(&k2, dt * 0.5), omega_sq);
    let k4 = dynamics::derivatives(&state.apply(&k3, dt), omega_sq);

    State {
        time: state.time + dt,
        theta: state.theta
            + (k1.dtheta + 2.0 * k2.dtheta + 2.0 * k3.dtheta + k4.dtheta) * (dt / 6.0),
        theta_dot: state.theta_dot
            + (k1.dtheta_dot + 2.0 * k2.dtheta_dot + 2.0 * k3.dtheta_dot + k4.dtheta_dot)
                * (dt / 6.0),
    }
}
