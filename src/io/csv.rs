use std::io::{self, Write};

use crate::trajectory::Trajectory;

/// Write trajectory data to CSV format.
///
/// Columns: time, theta, theta_dot, pos_x, pos_y
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &Trajectory) -> io::Result<()> {
    writeln!(writer, "time,theta,theta_dot,pos_x,pos_y")?;

    for s in trajectory {
        writeln!(
            writer,
            "{:.4},{:.8},{:.8},{:.6},{:.6}",
            s.time, s.theta, s.theta_dot, s.pos.x, s.pos.y,
        )?;
    }

    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: &str, trajectory: &Trajectory) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_trajectory(&mut file, trajectory)?;
    file.flush()
}
