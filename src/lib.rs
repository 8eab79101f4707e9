//! Simple pendulum simulation driven by a fixed-step classical RK4 integrator.
//!
//! ```no_run
//! use pendulum_sim::{integrate, PendulumConfig};
//!
//! let trajectory = integrate(&PendulumConfig::default())?;
//! assert_eq!(trajectory.len(), 3301);
//! # Ok::<(), pendulum_sim::Error>(())
//! ```

pub mod config;
pub mod dynamics;
pub mod error;
pub mod io;
pub mod sim;
pub mod trajectory;

pub use config::PendulumConfig;
pub use error::{Error, Result};
pub use sim::{integrate, integrate_with};
pub use trajectory::{Trajectory, TrajectorySample};
