pub mod pendulum;
pub mod state;

pub use pendulum::{derivatives, small_angle_period, specific_energy};
pub use state::{Deriv, State};
