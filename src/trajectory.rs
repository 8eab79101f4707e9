use std::ops::Index;

use nalgebra::Vector2;

use crate::config::PendulumConfig;
use crate::dynamics::{specific_energy, State};
use crate::sim::event;

// ---------------------------------------------------------------------------
// Trajectory sample
// ---------------------------------------------------------------------------

/// Pendulum state at one instant, with the Cartesian bob position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub time: f64,         // s
    pub theta: f64,        // rad
    pub theta_dot: f64,    // rad/s
    pub pos: Vector2<f64>, // m, relative to pivot, y up
}

impl TrajectorySample {
    pub fn from_state(state: &State, l: f64) -> Self {
        Self {
            time: state.time,
            theta: state.theta,
            theta_dot: state.theta_dot,
            pos: state.bob_position(l),
        }
    }

    pub fn state(&self) -> State {
        State {
            time: self.time,
            theta: self.theta,
            theta_dot: self.theta_dot,
        }
    }
}

// ---------------------------------------------------------------------------
// Trajectory
// ---------------------------------------------------------------------------

/// How an integration run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Completed,
    StoppedByObserver,
}

/// Time-ordered samples of one run. Index 0 is the initial condition and
/// index i is the state after i RK4 steps. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    config: PendulumConfig,
    samples: Vec<TrajectorySample>,
    status: Status,
}

impl Trajectory {
    pub(crate) fn starting_at(config: PendulumConfig, initial: TrajectorySample) -> Self {
        let capacity = config.n_steps().saturating_add(1).min(200_000);
        let mut samples = Vec::with_capacity(capacity);
        samples.push(initial);
        Self {
            config,
            samples,
            status: Status::Completed,
        }
    }

    pub(crate) fn push(&mut self, sample: TrajectorySample) {
        self.samples.push(sample);
    }

    pub(crate) fn mark_stopped(&mut self) {
        self.status = Status::StoppedByObserver;
    }

    pub fn config(&self) -> &PendulumConfig {
        &self.config
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectorySample> {
        self.samples.iter()
    }

    pub fn initial(&self) -> &TrajectorySample {
        &self.samples[0]
    }

    /// Last sample. Its time is `n_steps * dt`, not necessarily `t_final`.
    pub fn final_sample(&self) -> &TrajectorySample {
        &self.samples[self.samples.len() - 1]
    }

    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.time).collect()
    }

    pub fn thetas(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.theta).collect()
    }

    pub fn theta_dots(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.theta_dot).collect()
    }

    pub fn pos_x(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.pos.x).collect()
    }

    pub fn pos_y(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.pos.y).collect()
    }

    /// Specific mechanical energy at every sample.
    pub fn energies(&self) -> Vec<f64> {
        let omega_sq = self.config.omega_sq();
        self.samples
            .iter()
            .map(|s| specific_energy(s.theta, s.theta_dot, omega_sq))
            .collect()
    }

    /// Largest deviation of energy from its initial value, relative to
    /// `|E[0]|`. Falls back to the absolute deviation when `E[0]` is zero
    /// (release from exactly horizontal).
    pub fn energy_drift(&self) -> f64 {
        let energies = self.energies();
        let e0 = energies[0];
        let max_dev = energies
            .iter()
            .map(|e| (e - e0).abs())
            .fold(0.0_f64, f64::max);
        if e0.abs() > f64::EPSILON {
            max_dev / e0.abs()
        } else {
            max_dev
        }
    }

    /// Mean oscillation period measured between same-direction crossings of
    /// the bottom. `None` if fewer than two such crossings occurred.
    pub fn estimate_period(&self) -> Option<f64> {
        event::estimate_period(self)
    }

    pub fn max_abs_theta(&self) -> f64 {
        self.samples.iter().map(|s| s.theta.abs()).fold(0.0_f64, f64::max)
    }

    pub fn max_abs_theta_dot(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.theta_dot.abs())
            .fold(0.0_f64, f64::max)
    }
}

impl Index<usize> for Trajectory {
    type Output = TrajectorySample;

    fn index(&self, i: usize) -> &TrajectorySample {
        &self.samples[i]
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectorySample;
    type IntoIter = std::slice::Iter<'a, TrajectorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Hand-built trajectory for tests that do not need the integrator.
    pub(crate) fn from_thetas(config: PendulumConfig, points: &[(f64, f64, f64)]) -> Trajectory {
        let to_sample = |&(time, theta, theta_dot): &(f64, f64, f64)| {
            TrajectorySample::from_state(&State { time, theta, theta_dot }, config.l)
        };
        let mut traj = Trajectory::starting_at(config, to_sample(&points[0]));
        for p in &points[1..] {
            traj.push(to_sample(p));
        }
        traj
    }

    #[test]
    fn column_views_follow_sample_order() {
        let traj = from_thetas(
            PendulumConfig::default(),
            &[(0.0, 0.1, 0.0), (0.5, 0.0, -0.3), (1.0, -0.1, 0.0)],
        );
        assert_eq!(traj.len(), 3);
        assert_eq!(traj.times(), vec![0.0, 0.5, 1.0]);
        assert_eq!(traj.thetas(), vec![0.1, 0.0, -0.1]);
        assert_eq!(traj.theta_dots(), vec![0.0, -0.3, 0.0]);
        assert_abs_diff_eq!(traj.pos_y()[1], -1.0);
        assert_abs_diff_eq!(traj.pos_x()[2], -(0.1_f64.sin()));
        assert_eq!(traj[2].time, traj.final_sample().time);
        assert_eq!(traj.initial().theta, 0.1);
    }

    #[test]
    fn exact_energy_has_no_drift() {
        let c = PendulumConfig::default();
        let e0 = specific_energy(0.3, 0.0, c.omega_sq());
        // Same energy at the bottom: 0.5 w^2 - g/l = e0
        let w = (2.0 * (e0 + c.omega_sq())).sqrt();
        let traj = from_thetas(c, &[(0.0, 0.3, 0.0), (0.4, 0.0, -w)]);
        assert_abs_diff_eq!(traj.energy_drift(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn drift_is_relative_to_initial_energy() {
        let c = PendulumConfig::default();
        let traj = from_thetas(c, &[(0.0, 0.0, 0.0), (0.1, 0.0, 1.0)]);
        // E0 = -9.81, E1 = 0.5 - 9.81
        assert_abs_diff_eq!(traj.energy_drift(), 0.5 / 9.81, epsilon = 1e-12);
    }

    #[test]
    fn extremes() {
        let traj = from_thetas(
            PendulumConfig::default(),
            &[(0.0, 0.4, 0.0), (0.5, 0.0, -1.9), (1.0, -0.39, 0.0)],
        );
        assert_abs_diff_eq!(traj.max_abs_theta(), 0.4);
        assert_abs_diff_eq!(traj.max_abs_theta_dot(), 1.9);
    }
}
