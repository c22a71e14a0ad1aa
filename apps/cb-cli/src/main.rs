use clap::{Parser, Subcommand, ValueEnum};
use cb_core::units::{TemperatureScale, to_rankine};
use cb_fluids::{
    Composition, PengRobinson, PropertyTable, RootStrategy, SolverSettings, StandardTableRef,
};
use cb_process::{HeatDutyInput, heat_duty, refrigerant_flow};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod report;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] cb_project::ProjectError),

    #[error(transparent)]
    Process(#[from] cb_process::ProcessError),

    #[error(transparent)]
    Fluid(#[from] cb_fluids::FluidError),

    #[error("{0}")]
    Usage(String),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "cb-cli")]
#[command(about = "Coldbox CLI - gas chiller duty and propane refrigerant sizing", long_about = None)]
struct Cli {
    /// Log solver progress (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Newton-Raphson from Z = 1
    Newton,
    /// Largest real root of the cubic, closed form
    Largest,
}

impl From<StrategyArg> for RootStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Newton => RootStrategy::NewtonVaporGuess,
            StrategyArg::Largest => RootStrategy::LargestRealRoot,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the species property table
    Species,
    /// Heat duty to chill a gas stream at constant pressure
    Duty {
        /// Mass flow [lb/hr]
        #[arg(long)]
        flow: f64,
        /// Inlet temperature
        #[arg(long, allow_negative_numbers = true)]
        t_in: f64,
        /// Outlet temperature
        #[arg(long, allow_negative_numbers = true)]
        t_out: f64,
        /// Pressure [psia]
        #[arg(long)]
        pressure: f64,
        /// Mole fractions, e.g. Methane=0.85,Ethane=0.07
        #[arg(long, value_delimiter = ',', value_parser = parse_fraction, required = true)]
        comp: Vec<(String, f64)>,
        /// Temperature scale (F, R, C, K)
        #[arg(long, default_value = "F")]
        unit: TemperatureScale,
        /// Also size the refrigerant entering at this temperature
        #[arg(long, allow_negative_numbers = true)]
        refrigerant_t_in: Option<f64>,
        #[arg(long, value_enum, default_value_t = StrategyArg::Newton)]
        strategy: StrategyArg,
        /// Fail when Newton does not converge
        #[arg(long)]
        strict: bool,
    },
    /// Propane flow needed to absorb a known duty
    Refrigerant {
        /// Heat duty [Btu/hr]; only the magnitude is used
        #[arg(long, allow_negative_numbers = true)]
        duty: f64,
        /// Refrigerant inlet temperature
        #[arg(long, allow_negative_numbers = true)]
        t_in: f64,
        /// Temperature scale (F, R, C, K)
        #[arg(long, default_value = "F")]
        unit: TemperatureScale,
    },
    /// Evaluate a case file (YAML or JSON)
    Run {
        /// Path to the case file
        case_path: PathBuf,
    },
    /// Validate case file syntax and values
    Validate {
        /// Path to the case file
        case_path: PathBuf,
    },
    /// Write a starter case file
    Init {
        /// Path to the new case file
        case_path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_fraction(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=FRACTION, got '{s}'"))?;
    let fraction = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad fraction for {name}: {e}"))?;
    Ok((name.trim().to_string(), fraction))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Species => cmd_species(),
        Commands::Duty {
            flow,
            t_in,
            t_out,
            pressure,
            comp,
            unit,
            refrigerant_t_in,
            strategy,
            strict,
        } => {
            let input = HeatDutyInput {
                mass_flow_lb_per_hr: flow,
                t_in_r: to_rankine(unit.quantity(t_in)),
                t_out_r: to_rankine(unit.quantity(t_out)),
                p_psia: pressure,
                composition: Composition::new(comp)?,
            };
            let solver = SolverSettings {
                strategy: strategy.into(),
                strict_convergence: strict,
                ..SolverSettings::default()
            };
            let refrigerant_t_in_r = refrigerant_t_in.map(|t| to_rankine(unit.quantity(t)));
            cmd_duty(&input, solver, refrigerant_t_in_r)
        }
        Commands::Refrigerant { duty, t_in, unit } => {
            cmd_refrigerant(duty, to_rankine(unit.quantity(t_in)))
        }
        Commands::Run { case_path } => cmd_run(&case_path),
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Init { case_path, force } => cmd_init(&case_path, force),
    }
}

fn standard_table() -> Arc<dyn PropertyTable> {
    Arc::new(StandardTableRef)
}

fn cmd_species() -> CliResult<()> {
    report::print_species(&StandardTableRef);
    Ok(())
}

fn cmd_duty(
    input: &HeatDutyInput,
    solver: SolverSettings,
    refrigerant_t_in_r: Option<f64>,
) -> CliResult<()> {
    let table = standard_table();
    let model = PengRobinson::new(Arc::clone(&table)).with_solver(solver);
    let result = heat_duty(&model, input)?;
    report::print_duty(&result);

    if let Some(t_in_r) = refrigerant_t_in_r {
        let sizing = refrigerant_flow(table.as_ref(), result.duty_btu_per_hr, t_in_r)?;
        println!();
        report::print_refrigerant(&sizing);
    }
    Ok(())
}

fn cmd_refrigerant(duty: f64, t_in_r: f64) -> CliResult<()> {
    let sizing = refrigerant_flow(&StandardTableRef, duty, t_in_r)?;
    report::print_refrigerant(&sizing);
    Ok(())
}

fn cmd_run(case_path: &Path) -> CliResult<()> {
    let case = cb_project::load_case(case_path)?;
    println!("Running case: {}", case.name);
    let report = cb_project::run_case(&case, standard_table())?;
    report::print_duty(&report.duty);
    if let Some(sizing) = &report.refrigerant {
        println!();
        report::print_refrigerant(sizing);
    }
    Ok(())
}

fn cmd_validate(case_path: &Path) -> CliResult<()> {
    println!("Validating case: {}", case_path.display());
    cb_project::load_case(case_path)?;
    println!("✓ Case is valid");
    Ok(())
}

fn cmd_init(case_path: &Path, force: bool) -> CliResult<()> {
    if case_path.exists() && !force {
        return Err(CliError::Usage(format!(
            "{} already exists (use --force to overwrite)",
            case_path.display()
        )));
    }
    cb_project::save_case(case_path, &cb_project::CaseDef::example())?;
    println!("✓ Wrote {}", case_path.display());
    Ok(())
}
