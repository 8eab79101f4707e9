use crate::trajectory::{Trajectory, TrajectorySample};

/// Distance from the pivot down to the plane heights are reported against.
pub const DEFAULT_REFERENCE_OFFSET: f64 = 5.0;

/// Bob height above a plane located `offset` below the pivot.
pub fn height_above_reference(sample: &TrajectorySample, offset: f64) -> f64 {
    offset + sample.pos.y
}

/// One-line summary of where the run ended.
pub fn summary_line(trajectory: &Trajectory, offset: f64) -> String {
    let last = trajectory.final_sample();
    format!(
        "After {:.2} seconds, the pendulum bob has height {:.2} meters",
        last.time,
        height_above_reference(last, offset)
    )
}
