mod demos;
mod disc;
mod error;
mod initialization;
mod io;
mod solver;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use crate::demos::{DemoMode, SampledSeries};
use crate::error::HhoResult;
use crate::initialization::ParamOverrides;
use crate::io::plot::{GnuplotSink, PlotSink};
use crate::io::write_to_csv::write_series_to_csv;

/// One-dimensional Hybrid High-Order demonstrator
#[derive(Parser, Debug)]
#[command(name = "hho-demo-1d", disable_help_flag = true)]
struct Cli {
    /// Demonstration to run
    #[arg(value_enum)]
    mode: Option<DemoMode>,
    /// Polynomial degree of the cell unknowns
    #[arg(short = 'k', allow_negative_numbers = true)]
    degree: Option<i64>,
    /// Number of mesh elements
    #[arg(short = 'n')]
    num_elements: Option<usize>,
    /// Evaluation points per element
    #[arg(short = 'p')]
    eval_per_elem: Option<usize>,
    /// Write the sampled series to this CSV file
    #[arg(short = 'f')]
    filename: Option<String>,
    /// Plot the sampled series with gnuplot
    #[arg(short = 'd')]
    draw: bool,
    /// JSON file with base run parameters
    #[arg(long)]
    params: Option<String>,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: Level,
    /// Print usage
    #[arg(short = 'h')]
    help: bool,
}

fn usage() {
    let _ = Cli::command().print_help();
}

fn run(mode: DemoMode, cli: Cli) -> HhoResult<()> {
    let base = initialization::initialize_params_by_file(cli.params.as_deref())?;
    let params = initialization::apply_overrides(
        base,
        ParamOverrides {
            degree: cli.degree,
            num_elements: cli.num_elements,
            eval_per_elem: cli.eval_per_elem,
            filename: cli.filename,
            draw: cli.draw,
        },
    );
    initialization::report_params(&params);

    let mesh = initialization::initialize_mesh1d::<f64>(params.num_elements)?;
    let series = demos::run(mode, &mesh, params.degree, params.eval_per_elem)?;

    if let Some(filename) = &params.filename {
        write_series_to_csv(&series, filename)?;
        let samples: usize = series.iter().map(SampledSeries::len).sum();
        info!("Wrote {} series ({} samples) to {}", series.len(), samples, filename);
    }
    if params.draw {
        GnuplotSink::default().plot(&series)?;
    }
    Ok(())
}

/// What to do with a parsed command line.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Usage,
    MissingMode,
    Run(DemoMode),
}
impl Action {
    fn from_cli(cli: &Cli) -> Self {
        match (cli.help, cli.mode) {
            (true, _) => Action::Usage,
            (false, None) => Action::MissingMode,
            (false, Some(mode)) => Action::Run(mode),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Status {
    Success,
    Failure,
}
impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

/// Usage requests, a missing mode and failed runs all exit with failure.
fn execute(cli: Cli) -> Status {
    match Action::from_cli(&cli) {
        Action::Usage => {
            usage();
            Status::Failure
        }
        Action::MissingMode => {
            error!("No demonstration given, choose one of projection, gradrec, diffusion");
            usage();
            Status::Failure
        }
        Action::Run(mode) => match run(mode, cli) {
            Ok(()) => Status::Success,
            Err(err) => {
                error!("{err}");
                Status::Failure
            }
        },
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install the logger: {err}");
        return ExitCode::FAILURE;
    }

    execute(cli).into()
}
