use tracing::{debug, info, warn};

use super::integrator::rk4_step;
use crate::config::PendulumConfig;
use crate::dynamics::state::State;
use crate::error::Result;
use crate::trajectory::{Trajectory, TrajectorySample};

// ---------------------------------------------------------------------------
// Step observer (early-abort hook)
// ---------------------------------------------------------------------------

/// What the runner should do after a step has been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Continue,
    Stop,
}

/// Passive hook called with every sample after it is appended.
pub trait StepObserver {
    fn observe(&mut self, step: usize, sample: &TrajectorySample) -> StepAction;
}

impl<F> StepObserver for F
where
    F: FnMut(usize, &TrajectorySample) -> StepAction,
{
    fn observe(&mut self, step: usize, sample: &TrajectorySample) -> StepAction {
        self(step, sample)
    }
}

// ---------------------------------------------------------------------------
// Full simulation loop
// ---------------------------------------------------------------------------

/// Integrate the pendulum from rest at `theta_0` for `n_steps` RK4 steps.
///
/// Returns `n_steps + 1` samples; sample 0 is the release state.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidParameter`] if `l`, `dt` or `t_final` is
/// not strictly positive, before any step is taken.
pub fn integrate(config: &PendulumConfig) -> Result<Trajectory> {
    integrate_with(config, &mut |_: usize, _: &TrajectorySample| StepAction::Continue)
}

/// Like [`integrate`], but lets `observer` stop the run after any step.
/// A stopped run keeps the samples produced so far and reports
/// [`crate::trajectory::Status::StoppedByObserver`].
pub fn integrate_with(
    config: &PendulumConfig,
    observer: &mut dyn StepObserver,
) -> Result<Trajectory> {
    config.validate()?;

    let n_steps = config.n_steps();
    let omega_sq = config.omega_sq();
    info!(n_steps, dt = config.dt, theta_0 = config.theta_0, "integrating pendulum");

    let mut state = State::at_rest(config.theta_0_rad());
    let mut trajectory =
        Trajectory::starting_at(*config, TrajectorySample::from_state(&state, config.l));

    if observer.observe(0, trajectory.initial()) == StepAction::Stop {
        warn!(step = 0, "integration stopped by observer");
        trajectory.mark_stopped();
        return Ok(trajectory);
    }

    for step in 1..=n_steps {
        state = rk4_step(&state, omega_sq, config.dt);
        let sample = TrajectorySample::from_state(&state, config.l);
        trajectory.push(sample);

        if observer.observe(step, &sample) == StepAction::Stop {
            warn!(step, time = state.time, "integration stopped by observer");
            trajectory.mark_stopped();
            return Ok(trajectory);
        }
    }

    debug!(
        final_time = trajectory.final_sample().time,
        energy_drift = trajectory.energy_drift(),
        "integration complete"
    );
    Ok(trajectory)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
