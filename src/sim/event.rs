use tracing::trace;

use crate::trajectory::{Trajectory, TrajectorySample};

// ---------------------------------------------------------------------------
// Swing events
// ---------------------------------------------------------------------------

/// Direction of angular motion at an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Rising,  // theta increasing
    Falling, // theta decreasing
}

/// Kinds of swing events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// Bob passes the bottom of its arc (theta changes sign).
    BottomCrossing { direction: Direction },
    /// Bob momentarily stops at the end of a swing (theta_dot changes sign).
    TurningPoint { theta: f64 },
}

/// A discrete event located between two consecutive samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SwingEvent {
    pub time: f64, // linearly interpolated crossing instant
    pub kind: EventKind,
    pub sample: TrajectorySample, // first sample after the event
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive samples and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &TrajectorySample, current: &TrajectorySample) -> Option<SwingEvent>;
}

/// Detects the bob passing through the bottom of the arc.
///
/// The bottom is any angle 2*pi*k, so crossings are sign changes of
/// `sin(theta)` while the bob is in the lower half (`cos(theta) > 0`).
/// A sample landing exactly on the bottom only counts once the next sample
/// shows the bob on the opposite side.
#[derive(Debug, Clone, Default)]
pub struct BottomCrossingDetector {
    touched: Option<(f64, f64)>, // (sin theta before the touch, time of the touch)
}

impl BottomCrossingDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventDetector for BottomCrossingDetector {
    fn check(&mut self, prev: &TrajectorySample, current: &TrajectorySample) -> Option<SwingEvent> {
        if prev.theta.cos() <= 0.0 || current.theta.cos() <= 0.0 {
            self.touched = None;
            return None;
        }
        let (s0, s1) = (prev.theta.sin(), current.theta.sin());

        if s1 == 0.0 {
            if s0 != 0.0 {
                self.touched = Some((s0, current.time));
            }
            return None;
        }

        let time = if s0 == 0.0 {
            match self.touched.take() {
                Some((before, t)) if opposite_signs(before, s1) => t,
                _ => return None,
            }
        } else if opposite_signs(s0, s1) {
            interpolate_root(prev.time, s0, current.time, s1)
        } else {
            return None;
        };

        let direction = if s1 > 0.0 { Direction::Rising } else { Direction::Falling };
        Some(SwingEvent {
            time,
            kind: EventKind::BottomCrossing { direction },
            sample: *current,
        })
    }
}

fn opposite_signs(a: f64, b: f64) -> bool {
    (a < 0.0 && b > 0.0) || (a > 0.0 && b < 0.0)
}

/// Detects the ends of each swing, where angular velocity changes sign.
pub struct TurningPointDetector;

impl EventDetector for TurningPointDetector {
    fn check(&mut self, prev: &TrajectorySample, current: &TrajectorySample) -> Option<SwingEvent> {
        let crossed = (prev.theta_dot > 0.0 && current.theta_dot <= 0.0)
            || (prev.theta_dot < 0.0 && current.theta_dot >= 0.0);
        if !crossed {
            return None;
        }
        let time = interpolate_root(prev.time, prev.theta_dot, current.time, current.theta_dot);
        let frac = (time - prev.time) / (current.time - prev.time);
        Some(SwingEvent {
            time,
            kind: EventKind::TurningPoint {
                theta: prev.theta + (current.theta - prev.theta) * frac,
            },
            sample: *current,
        })
    }
}

/// Zero of the line through (t0, v0) and (t1, v1). Assumes v0 != v1.
fn interpolate_root(t0: f64, v0: f64, t1: f64, v1: f64) -> f64 {
    t0 + (t1 - t0) * v0 / (v0 - v1)
}

/// Run a detector over every consecutive pair of samples.
pub fn detect_events(trajectory: &Trajectory, detector: &mut dyn EventDetector) -> Vec<SwingEvent> {
    let mut events = Vec::new();
    for pair in trajectory.samples().windows(2) {
        if let Some(event) = detector.check(&pair[0], &pair[1]) {
            trace!(time = event.time, kind = ?event.kind, "swing event");
            events.push(event);
        }
    }
    events
}

/// Mean period from same-direction bottom crossings.
///
/// Uses whichever direction has more crossings. `None` if that direction
/// has fewer than two.
pub fn estimate_period(trajectory: &Trajectory) -> Option<f64> {
    let crossings = detect_events(trajectory, &mut BottomCrossingDetector::new());
    let times_for = |dir: Direction| -> Vec<f64> {
        crossings
            .iter()
            .filter(|e| e.kind == EventKind::BottomCrossing { direction: dir })
            .map(|e| e.time)
            .collect()
    };
    let falling = times_for(Direction::Falling);
    let rising = times_for(Direction::Rising);
    let times = if falling.len() >= rising.len() { falling } else { rising };

    match times.as_slice() {
        [first, .., last] => Some((last - first) / (times.len() - 1) as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PendulumConfig;
    use crate::trajectory::tests::from_thetas;
    use approx::assert_abs_diff_eq;

    fn sample(time: f64, theta: f64, theta_dot: f64) -> TrajectorySample {
        from_thetas(PendulumConfig::default(), &[(time, theta, theta_dot)])[0]
    }

    #[test]
    fn bottom_crossing_falling() {
        let mut det = BottomCrossingDetector::new();
        let ev = det
            .check(&sample(1.0, 0.1, -1.0), &sample(1.1, -0.3, -1.0))
            .unwrap();
        assert_eq!(ev.kind, EventKind::BottomCrossing { direction: Direction::Falling });
        let (s0, s1) = (0.1_f64.sin(), (-0.3_f64).sin());
        assert_abs_diff_eq!(ev.time, 1.0 + 0.1 * s0 / (s0 - s1), epsilon = 1e-12);
    }

    #[test]
    fn bottom_crossing_rising() {
        let mut det = BottomCrossingDetector::new();
        let ev = det
            .check(&sample(0.0, -0.2, 1.0), &sample(0.2, 0.2, 1.0))
            .unwrap();
        assert_eq!(ev.kind, EventKind::BottomCrossing { direction: Direction::Rising });
        assert_abs_diff_eq!(ev.time, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn no_crossing_on_same_side() {
        let mut det = BottomCrossingDetector::new();
        assert!(det.check(&sample(0.0, 0.2, -1.0), &sample(0.1, 0.1, -1.0)).is_none());
    }

    #[test]
    fn crossing_found_around_full_turn() {
        let tau = 2.0 * std::f64::consts::PI;
        let mut det = BottomCrossingDetector::new();
        let ev = det
            .check(&sample(0.0, tau + 0.1, -1.0), &sample(0.1, tau - 0.1, -1.0))
            .unwrap();
        assert_eq!(ev.kind, EventKind::BottomCrossing { direction: Direction::Falling });
        assert_abs_diff_eq!(ev.time, 0.05, epsilon = 1e-9);
    }

    #[test]
    fn passing_over_the_top_is_not_a_crossing() {
        let pi = std::f64::consts::PI;
        let mut det = BottomCrossingDetector::new();
        assert!(det.check(&sample(0.0, pi - 0.1, 1.0), &sample(0.1, pi + 0.1, 1.0)).is_none());
    }

    #[test]
    fn touching_bottom_and_returning_is_not_a_crossing() {
        let traj = from_thetas(
            PendulumConfig::default(),
            &[(0.0, 0.1, -1.0), (0.1, 0.0, 0.0), (0.2, 0.1, 1.0)],
        );
        let events = detect_events(&traj, &mut BottomCrossingDetector::new());
        assert!(events.is_empty());
    }

    #[test]
    fn landing_on_bottom_then_passing_counts_once() {
        let traj = from_thetas(
            PendulumConfig::default(),
            &[(0.0, 0.1, -1.0), (0.1, 0.0, -1.0), (0.2, -0.1, -1.0), (0.3, -0.2, -1.0)],
        );
        let events = detect_events(&traj, &mut BottomCrossingDetector::new());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].time, 0.1);
        assert_eq!(events[0].kind, EventKind::BottomCrossing { direction: Direction::Falling });
    }

    #[test]
    fn release_from_rest_is_not_a_turning_point() {
        let mut det = TurningPointDetector;
        assert!(det.check(&sample(0.0, 0.5, 0.0), &sample(0.01, 0.49, -0.1)).is_none());
    }

    #[test]
    fn turning_point_interpolates_angle() {
        let mut det = TurningPointDetector;
        let ev = det
            .check(&sample(2.0, -0.60, -0.1), &sample(2.01, -0.62, 0.1))
            .unwrap();
        assert_abs_diff_eq!(ev.time, 2.005, epsilon = 1e-12);
        match ev.kind {
            EventKind::TurningPoint { theta } => assert_abs_diff_eq!(theta, -0.61, epsilon = 1e-12),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn period_from_synthetic_cosine() {
        let period = 2.0;
        let dt = 0.001;
        let points: Vec<(f64, f64, f64)> = (0..=4700)
            .map(|i| {
                let t = i as f64 * dt;
                let w = 2.0 * std::f64::consts::PI / period;
                (t, 0.1 * (w * t).cos(), -0.1 * w * (w * t).sin())
            })
            .collect();
        let traj = from_thetas(PendulumConfig::default(), &points);
        // Falling crossings at 0.5, 2.5, 4.5
        assert_abs_diff_eq!(estimate_period(&traj).unwrap(), period, epsilon = 1e-4);

        let turns = detect_events(&traj, &mut TurningPointDetector);
        // Turning points at t = 1, 2, 3, 4
        assert_eq!(turns.len(), 4);
    }

    #[test]
    fn no_period_without_motion() {
        let traj = from_thetas(
            PendulumConfig::default(),
            &[(0.0, 0.0, 0.0), (0.1, 0.0, 0.0), (0.2, 0.0, 0.0)],
        );
        assert!(estimate_period(&traj).is_none());
    }
}
