use clap::{Parser, Subcommand, ValueEnum};
use nse_core::{Species, StatePoint, g_per_cm3, mev, unitless};
use nse_solver::{EquilibriumSolution, EquilibriumSolver, JacobianMethod, NewtonConfig};
use nse_sweep::{
    ExecutionMode, SweepDefinition, SweepPlan, SweepResult, SweepSpacing, SweepVariable,
    execute_sweep, load_plan, write_csv, write_json,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nse-cli")]
#[command(
    about = "NSE mass fractions of neutrons, protons and alpha particles",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single state point
    Solve {
        /// Mass density in g/cm³
        #[arg(long)]
        density: f64,
        /// Temperature in MeV
        #[arg(long)]
        temperature: f64,
        /// Proton fraction Y_p
        #[arg(long)]
        proton_fraction: f64,
        /// Print the full solution as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// Sweep one coordinate with the others held fixed
    Sweep {
        /// Coordinate to sweep
        variable: SweepAxis,
        #[arg(long)]
        start: f64,
        #[arg(long)]
        end: f64,
        /// Number of points, endpoints included
        #[arg(long, default_value_t = 10)]
        points: usize,
        /// Space points logarithmically
        #[arg(long)]
        log: bool,
        /// Solve points on all cores
        #[arg(long)]
        parallel: bool,
        /// Mass density in g/cm³ (fixed axis)
        #[arg(long, default_value_t = 1.0e11)]
        density: f64,
        /// Temperature in MeV (fixed axis)
        #[arg(long, default_value_t = 3.0)]
        temperature: f64,
        /// Proton fraction Y_p (fixed axis)
        #[arg(long, default_value_t = 0.5)]
        proton_fraction: f64,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// Run a YAML or JSON sweep plan
    Run {
        /// Path to the plan file
        plan_path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output file path (optional, defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

#[derive(clap::Args)]
struct SolverArgs {
    /// Newton iteration budget
    #[arg(long)]
    max_iterations: Option<usize>,
    /// Absolute residual tolerance
    #[arg(long)]
    tolerance: Option<f64>,
    #[arg(long, value_enum)]
    jacobian: Option<JacobianArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SweepAxis {
    Temperature,
    ProtonFraction,
    Density,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum JacobianArg {
    Analytic,
    Forward,
    Central,
}

impl From<SweepAxis> for SweepVariable {
    fn from(axis: SweepAxis) -> Self {
        match axis {
            SweepAxis::Temperature => SweepVariable::Temperature,
            SweepAxis::ProtonFraction => SweepVariable::ProtonFraction,
            SweepAxis::Density => SweepVariable::Density,
        }
    }
}

impl From<JacobianArg> for JacobianMethod {
    fn from(arg: JacobianArg) -> Self {
        match arg {
            JacobianArg::Analytic => JacobianMethod::Analytic,
            JacobianArg::Forward => JacobianMethod::ForwardDifference,
            JacobianArg::Central => JacobianMethod::CentralDifference,
        }
    }
}

impl SolverArgs {
    fn config(&self) -> NewtonConfig {
        let mut config = NewtonConfig::default();
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if let Some(tolerance) = self.tolerance {
            config.abs_tol = tolerance;
        }
        if let Some(jacobian) = self.jacobian {
            config.jacobian = jacobian.into();
        }
        config
    }
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{0}")]
    State(#[from] nse_core::NseError),

    #[error("{0}")]
    Solver(#[from] nse_solver::SolverError),

    #[error("{0}")]
    Sweep(#[from] nse_sweep::SweepError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{failed} of {total} sweep points failed")]
    IncompleteSweep { failed: usize, total: usize },
}

type CliResult<T> = Result<T, CliError>;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Solve {
            density,
            temperature,
            proton_fraction,
            json,
            solver,
        } => cmd_solve(density, temperature, proton_fraction, json, &solver),
        Commands::Sweep {
            variable,
            start,
            end,
            points,
            log,
            parallel,
            density,
            temperature,
            proton_fraction,
            output,
            solver,
        } => state_from_flags(density, temperature, proton_fraction)
            .map_err(CliError::from)
            .and_then(|base| {
                let spacing = if log {
                    SweepSpacing::Logarithmic
                } else {
                    SweepSpacing::Linear
                };
                let sweep = SweepDefinition::new(variable.into(), start, end, points, spacing)?;
                let execution = if parallel {
                    ExecutionMode::Parallel
                } else {
                    ExecutionMode::Sequential
                };
                let plan = SweepPlan::new(base, sweep)
                    .with_solver(solver.config())
                    .with_execution(execution);
                cmd_sweep(&plan, &output)
            }),
        Commands::Run { plan_path, output } => cmd_run(&plan_path, &output),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Flags are given in g/cm³, MeV and a bare ratio.
fn state_from_flags(
    density: f64,
    temperature: f64,
    proton_fraction: f64,
) -> nse_core::NseResult<StatePoint> {
    StatePoint::from_quantities(g_per_cm3(density), mev(temperature), unitless(proton_fraction))
}

fn cmd_solve(
    density: f64,
    temperature: f64,
    proton_fraction: f64,
    json: bool,
    solver: &SolverArgs,
) -> CliResult<()> {
    let state = state_from_flags(density, temperature, proton_fraction)?;
    let solver = EquilibriumSolver::new(solver.config())?;
    let solution = solver.solve(&state)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        print_solution(&solution);
    }
    Ok(())
}

fn print_solution(solution: &EquilibriumSolution) {
    let state = &solution.state;
    println!(
        "State: rho = {:e} g/cm³, T = {} MeV, Y_p = {}",
        state.density(),
        state.temperature(),
        state.proton_fraction()
    );
    println!("\nMass fractions:");
    for species in Species::ALL {
        println!(
            "  {:<8} X = {:.10e}   mu = {:.6} MeV",
            species.display_name(),
            solution.mass_fractions.get(species),
            solution.potentials.get(species)
        );
    }
    println!("\nSolver:");
    if let Some(strategy) = solution.strategy {
        println!("  Initial guess:  {}", strategy.as_str());
    }
    println!("  Iterations:     {}", solution.iterations);
    println!("  Final residual: {:.3e}", solution.residual_norm);
}

fn cmd_sweep(plan: &SweepPlan, output: &OutputArgs) -> CliResult<()> {
    info!(sweep = %plan.sweep, "running sweep");
    let result = execute_sweep(plan)?;
    write_result(&result, output)?;

    if result.is_complete() {
        Ok(())
    } else {
        Err(CliError::IncompleteSweep {
            failed: result.num_failed,
            total: result.independent_values.len(),
        })
    }
}

fn cmd_run(plan_path: &Path, output: &OutputArgs) -> CliResult<()> {
    let plan = load_plan(plan_path)?;
    if let Some(name) = &plan.name {
        eprintln!("Running plan: {}", name);
    }
    cmd_sweep(&plan, output)
}

fn write_result(result: &SweepResult, output: &OutputArgs) -> CliResult<()> {
    match &output.output {
        Some(path) => {
            let file = BufWriter::new(File::create(path)?);
            write_formatted(result, output.format, file)?;
            eprintln!(
                "✓ Exported {} points to {}",
                result.independent_values.len(),
                path.display()
            );
        }
        None => write_formatted(result, output.format, io::stdout().lock())?,
    }
    Ok(())
}

fn write_formatted<W: Write>(
    result: &SweepResult,
    format: OutputFormat,
    out: W,
) -> CliResult<()> {
    match format {
        OutputFormat::Csv => write_csv(result, out)?,
        OutputFormat::Json => write_json(result, out)?,
    }
    Ok(())
}
