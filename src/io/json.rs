use std::io::{self, Write};

use crate::dynamics::small_angle_period;
use crate::io::report::height_above_reference;
use crate::trajectory::Trajectory;

/// Summary statistics computed from a pendulum trajectory.
#[derive(Debug, Clone)]
pub struct SwingSummary {
    pub steps: usize,
    pub final_time: f64,
    pub final_theta_deg: f64,
    pub final_height: f64,
    pub max_theta_deg: f64,
    pub max_theta_dot: f64,
    pub energy_drift: f64,
    pub period: Option<f64>,
    pub small_angle_period: f64,
}

impl SwingSummary {
    /// Compute summary from trajectory data. Heights are measured against a
    /// plane `reference_offset` below the pivot.
    pub fn from_trajectory(trajectory: &Trajectory, reference_offset: f64) -> Self {
        let config = trajectory.config();
        let last = trajectory.final_sample();

        SwingSummary {
            steps: trajectory.len() - 1,
            final_time: last.time,
            final_theta_deg: last.theta.to_degrees(),
            final_height: height_above_reference(last, reference_offset),
            max_theta_deg: trajectory.max_abs_theta().to_degrees(),
            max_theta_dot: trajectory.max_abs_theta_dot(),
            energy_drift: trajectory.energy_drift(),
            period: trajectory.estimate_period(),
            small_angle_period: small_angle_period(config.g, config.l),
        }
    }
}

/// Write swing summary as JSON to a writer.
pub fn write_summary<W: Write>(
    writer: &mut W,
    trajectory: &Trajectory,
    summary: &SwingSummary,
) -> io::Result<()> {
    let config = trajectory.config();
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"config\": {{")?;
    writeln!(writer, "    \"g\": {},", config.g)?;
    writeln!(writer, "    \"l\": {},", config.l)?;
    writeln!(writer, "    \"theta_0_deg\": {},", config.theta_0)?;
    writeln!(writer, "    \"t_final\": {},", config.t_final)?;
    writeln!(writer, "    \"dt\": {}", config.dt)?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"result\": {{")?;
    writeln!(writer, "    \"steps\": {},", summary.steps)?;
    writeln!(writer, "    \"final_time_s\": {:.4},", summary.final_time)?;
    writeln!(writer, "    \"final_theta_deg\": {:.4},", summary.final_theta_deg)?;
    writeln!(writer, "    \"final_height_m\": {:.4},", summary.final_height)?;
    writeln!(writer, "    \"max_theta_deg\": {:.4},", summary.max_theta_deg)?;
    writeln!(writer, "    \"max_theta_dot_rads\": {:.4},", summary.max_theta_dot)?;
    writeln!(writer, "    \"energy_drift\": {:e},", summary.energy_drift)?;
    match summary.period {
        Some(p) => writeln!(writer, "    \"period_s\": {p:.6},")?,
        None => writeln!(writer, "    \"period_s\": null,")?,
    }
    writeln!(writer, "    \"small_angle_period_s\": {:.6}", summary.small_angle_period)?;
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write swing summary JSON to a file.
pub fn write_summary_file(
    path: &str,
    trajectory: &Trajectory,
    summary: &SwingSummary,
) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, trajectory, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PendulumConfig;
    use crate::trajectory::tests::from_thetas;
    use approx::assert_abs_diff_eq;

    fn short_swing() -> Trajectory {
        from_thetas(
            PendulumConfig::default(),
            &[(0.0, 0.5, 0.0), (0.25, 0.0, -1.5), (0.5, -0.5, 0.0)],
        )
    }

    #[test]
    fn summary_reads_final_sample() {
        let s = SwingSummary::from_trajectory(&short_swing(), 5.0);
        assert_eq!(s.steps, 2);
        assert_abs_diff_eq!(s.final_time, 0.5);
        assert_abs_diff_eq!(s.final_height, 5.0 - 0.5_f64.cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(s.max_theta_deg, 0.5_f64.to_degrees(), epsilon = 1e-12);
        assert_abs_diff_eq!(s.max_theta_dot, 1.5);
        assert!(s.period.is_none());
    }

    #[test]
    fn json_output_is_valid() {
        let traj = short_swing();
        let summary = SwingSummary::from_trajectory(&traj, 5.0);

        let mut buf = Vec::new();
        write_summary(&mut buf, &traj, &summary).unwrap();
        let json = String::from_utf8(buf).unwrap();
        assert!(json.contains("\"config\""));
        assert!(json.contains("\"theta_0_deg\": 40,"));
        assert!(json.contains("\"period_s\": null,"));
        assert!(json.trim_end().ends_with('}'));
    }
}
