//! Two-body central force problem - main entry point
//!
//! Two subcommands on a named simulation run:
//! - `simulate` integrates the reduced one-body problem and records the
//!   sampled trajectory into `<name>/` next to the executable
//! - `plot` renders the nine diagnostic PNGs for a recorded run
//!
//! All errors are fatal: the failing subcommand prints a message and the
//! process exits non-zero.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use two_body_problem::config::PlotConfig;
use two_body_problem::pipeline;
use two_body_problem::run::RunDir;
use two_body_problem::sim::{SimParams, Simulation};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Two-body central force problem: simulate and plot",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Integrate the reduced one-body problem and record the trajectory
    Simulate(SimulateArgs),
    /// Render the nine diagnostic plots for a recorded run
    Plot(PlotArgs),
}

#[derive(Args)]
struct SimulateArgs {
    /// Name of the simulation
    #[arg(long)]
    name: String,

    /// Mass of object 1
    #[arg(long)]
    m1: f64,

    /// Mass of object 2
    #[arg(long)]
    m2: f64,

    /// Initial distance between the objects
    #[arg(long)]
    r: f64,

    /// Magnitude of the initial relative velocity of object 2 w.r.t. object 1
    #[arg(long)]
    v: f64,

    /// Orientation angle of the initial relative velocity (radians)
    #[arg(long)]
    vt: f64,

    /// Force law proportionality constant
    #[arg(long)]
    k: f64,

    /// Force law power (an integer)
    #[arg(long)]
    n: i32,

    /// Step size (arc length in phase space) for each iteration
    #[arg(long, default_value_t = SimParams::DEFAULT_STEP_SIZE)]
    step_size: f64,

    /// Total number of steps to be taken
    #[arg(long, default_value_t = SimParams::DEFAULT_STEPS)]
    steps: u64,

    /// Number of iterations between recorded samples
    #[arg(long, default_value_t = SimParams::DEFAULT_READ_STEPS)]
    read_steps: u64,

    /// Force overwrite of existing simulation data
    #[arg(long)]
    force: bool,
}

#[derive(Args)]
struct PlotArgs {
    /// Input simulation name
    #[arg(long)]
    name: String,
}

fn main() {
    println!(
        "2-body central force problem simulation v{}",
        env!("CARGO_PKG_VERSION")
    );

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Simulate(args) => simulate(args),
        Command::Plot(args) => plot(args),
    };

    if let Err(e) = result {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

fn simulate(args: SimulateArgs) -> Result<()> {
    println!("Simulation name: {}\n", args.name);

    let run_dir = RunDir::locate(&args.name)?;
    run_dir.create(args.force)?;

    let params = SimParams {
        m1: args.m1,
        m2: args.m2,
        r0: args.r,
        v0: args.v,
        v_ang: args.vt,
        k: args.k,
        n: args.n,
        step_size: args.step_size,
        steps: args.steps,
        read_steps: args.read_steps,
    };
    let mut sim = Simulation::new(params);

    println!("Potential function: U(r) = k*r^n");
    println!("  k = {}", args.k);
    println!("  n = {}\n", args.n);

    println!("Input parameters:");
    println!("  m1    = {}", args.m1);
    println!("  m2    = {}", args.m2);
    println!("  r     = {}", args.r);
    println!("  v     = {}", args.v);
    println!("  v_ang = {}\n", args.vt);

    println!("Derived parameters:");
    println!("  m  = {} (reduced mass)", sim.reduced_mass());
    println!("  pr = {} (canonical momentum for r)", sim.state().p_r);
    println!(
        "  L  = {} (canonical momentum for theta) (conserved)",
        sim.angular_momentum()
    );
    println!("  E  = {} (total energy) (conserved)\n", sim.total_energy());

    println!(
        "Number of steps: {}\nStep size: {}\nSampling every {} steps\n",
        args.steps, args.step_size, args.read_steps
    );

    println!("Starting simulation:");
    sim.run(&run_dir)?;
    Ok(())
}

fn plot(args: PlotArgs) -> Result<()> {
    println!("Plotting for simulation: {}\n", args.name);
    pipeline::run_plot(&args.name, &PlotConfig::default())?;
    println!("Plotting done");
    Ok(())
}
