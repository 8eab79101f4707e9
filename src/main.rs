use std::process::ExitCode;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::FmtSubscriber;

use pendulum_sim::dynamics::small_angle_period;
use pendulum_sim::io::csv;
use pendulum_sim::io::json::{self, SwingSummary};
use pendulum_sim::io::report::{self, DEFAULT_REFERENCE_OFFSET};
use pendulum_sim::sim::event::{detect_events, EventKind, TurningPointDetector};
use pendulum_sim::{integrate, PendulumConfig, Trajectory};

fn main() -> ExitCode {
    let level = if std::env::var_os("PENDULUM_SIM_DEBUG").is_some() {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: could not install logger: {err}");
    }

    // Optional prefix for CSV/JSON export.
    let export_prefix = std::env::args().nth(1);

    let config = PendulumConfig::default();

    // -----------------------------------------------------------------------
    // Run simulation
    // -----------------------------------------------------------------------
    let trajectory = match integrate(&config) {
        Ok(t) => t,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let summary = SwingSummary::from_trajectory(&trajectory, DEFAULT_REFERENCE_OFFSET);
    print_report(&config, &trajectory, &summary);

    if let Some(prefix) = export_prefix {
        let csv_path = format!("{prefix}_trajectory.csv");
        let json_path = format!("{prefix}_summary.json");
        if let Err(err) = csv::write_trajectory_file(&csv_path, &trajectory) {
            eprintln!("error: failed to write {csv_path}: {err}");
            return ExitCode::FAILURE;
        }
        if let Err(err) = json::write_summary_file(&json_path, &trajectory, &summary) {
            eprintln!("error: failed to write {json_path}: {err}");
            return ExitCode::FAILURE;
        }
        println!("  Exported: {csv_path}, {json_path}");
        println!();
    }

    ExitCode::SUCCESS
}

fn print_report(config: &PendulumConfig, trajectory: &Trajectory, summary: &SwingSummary) {
    println!();
    println!("====================================================================");
    println!("  SIMPLE PENDULUM — RK4");
    println!("====================================================================");
    println!();
    println!("  Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  g:             {:>8.3} m/s^2   Length:       {:>8.3} m",
        config.g, config.l
    );
    println!(
        "  Release angle: {:>8.1} deg     Duration:     {:>8.2} s",
        config.theta_0, config.t_final
    );
    println!(
        "  Timestep:      {:>8.4} s       Steps:        {:>8}",
        config.dt,
        config.n_steps()
    );
    println!();

    println!("  Swing");
    println!("  ──────────────────────────────────────────────────────────────────");
    match summary.period {
        Some(p) => println!(
            "  Period:        {:>8.4} s       Small-angle:  {:>8.4} s",
            p,
            small_angle_period(config.g, config.l)
        ),
        None => println!("  Period:        (less than one full swing)"),
    }
    println!(
        "  Max angle:     {:>8.2} deg     Max rate:     {:>8.3} rad/s",
        summary.max_theta_deg, summary.max_theta_dot
    );
    println!("  Energy drift:  {:>12.3e}", summary.energy_drift);

    let turns = detect_events(trajectory, &mut TurningPointDetector);
    for ev in turns.iter().take(4) {
        if let EventKind::TurningPoint { theta } = ev.kind {
            println!(
                "  TURN      t={:>6.3}s   theta={:>7.2} deg",
                ev.time,
                theta.to_degrees()
            );
        }
    }
    println!();

    // -----------------------------------------------------------------------
    // Trajectory table (sampled)
    // -----------------------------------------------------------------------
    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>11}  {:>8}  {:>8}",
        "t (s)", "theta(deg)", "rate(rad/s)", "x (m)", "y (m)"
    );
    println!("  {}", "─".repeat(52));

    let sample_interval = (trajectory.len() / 30).max(1);
    for (i, s) in trajectory.iter().enumerate() {
        if i % sample_interval != 0 && i != trajectory.len() - 1 {
            continue;
        }
        println!(
            "  {:>7.2}  {:>9.2}  {:>11.4}  {:>8.4}  {:>8.4}",
            s.time,
            s.theta.to_degrees(),
            s.theta_dot,
            s.pos.x,
            s.pos.y
        );
    }

    println!();
    println!("  {}", report::summary_line(trajectory, DEFAULT_REFERENCE_OFFSET));
    println!("====================================================================");
    println!();
}
