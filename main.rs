use clap::{ArgAction, Args, Parser, Subcommand};
use key_vertex::battery;
use key_vertex::display::{MatrixView, TraceView};
use key_vertex::graph::key_vertex::{decide, naive, TraceEntry};
use key_vertex::io::matrix_reader::{self, Format};
use key_vertex::simulation::airport::{Airport, AirportConfig};
use key_vertex::GraphResult;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};

#[derive(Parser, Debug)]
#[command(name = "main", version, about = "Key vertex detection and runway simulation")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbosity: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide whether a graph has a key vertex
    Check(CheckArgs),
    /// Run the built-in reference graphs
    Battery,
    /// Simulate the two-runway airport queue
    Airport(AirportArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Adjacency matrix file; stdin when absent
    path: Option<PathBuf>,

    /// Input format: text or json
    #[arg(short = 'f', long = "format", default_value = "text")]
    format: Format,

    /// Print the elimination steps
    #[arg(long = "trace", action = ArgAction::SetTrue)]
    trace: bool,

    /// Also run the quadratic check and compare
    #[arg(long = "cross-check", action = ArgAction::SetTrue)]
    cross_check: bool,

    /// Emit the verdict and trace as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,
}

// About ten years of 5 minute steps.
const MAX_STEPS: u64 = 1_000_000;

#[derive(Args, Debug)]
struct AirportArgs {
    /// Number of 5 minute steps
    #[arg(
        long = "steps",
        default_value_t = 122,
        value_parser = clap::value_parser!(u64).range(..=MAX_STEPS)
    )]
    steps: u64,

    /// RNG seed; random when absent
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Only print the summary
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

// Exit statuses. A graph without a key vertex is still a success.
const EXIT_OK: u8 = 0;
const EXIT_FAILURE: u8 = 1;
const EXIT_BAD_INPUT: u8 = 2;

fn check(args: &CheckArgs, out: &mut impl Write) -> GraphResult<u8> {
    let g = match &args.path {
        Some(path) => matrix_reader::read(BufReader::new(File::open(path)?), args.format)?,
        None => matrix_reader::read(io::stdin().lock(), args.format)?,
    };

    let mut log: Vec<TraceEntry> = vec![];
    let verdict = if args.trace || args.json {
        decide(&g, &mut log)
    } else {
        decide(&g, ())
    };

    if args.json {
        let report = serde_json::json!({
            "n": g.len(),
            "candidate": verdict.candidate,
            "key_vertex": verdict.key_vertex,
            "trace": log,
        });
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", MatrixView(&g))?;
        if args.trace && !log.is_empty() {
            writeln!(out, "{}", TraceView(&log))?;
        }
        writeln!(out, "{verdict}")?;
    }

    if args.cross_check {
        let expected = naive::key_vertices(&g).first().copied();
        if expected != verdict.key_vertex {
            error!(?expected, got = ?verdict.key_vertex, "cross-check mismatch");
            return Ok(EXIT_FAILURE);
        }
        info!("cross-check agrees");
    }
    Ok(EXIT_OK)
}

fn run_battery() -> GraphResult<u8> {
    let mut failed = 0;
    for outcome in battery::run_all()? {
        println!("{}: {}", outcome.case.name, outcome.verdict);
        if outcome.passed() {
            println!("OK");
        } else {
            failed += 1;
            println!("{} ERROR", "x".repeat(80));
        }
    }
    if failed > 0 {
        error!(failed, "reference battery failed");
        return Ok(EXIT_FAILURE);
    }
    Ok(EXIT_OK)
}

fn simulate(args: &AirportArgs) {
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, steps = args.steps, "starting airport simulation");
    let mut airport = Airport::seeded(AirportConfig::default(), seed);
    let summary = airport.run(args.steps, |report| {
        if !args.quiet {
            println!("{report}\n");
        }
    });
    println!("{summary}");
}

// Errors reading or validating the matrix all map to EXIT_BAD_INPUT.
fn exit_status(res: GraphResult<u8>) -> u8 {
    match res {
        Ok(status) => status,
        Err(e) => {
            error!(malformed = e.is_malformed(), "{e}");
            eprintln!("error: {e}");
            EXIT_BAD_INPUT
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    let res = match &cli.command {
        Command::Check(args) => check(args, &mut io::stdout().lock()),
        Command::Battery => run_battery(),
        Command::Airport(args) => {
            simulate(args);
            Ok(EXIT_OK)
        }
    };
    ExitCode::from(exit_status(res))
}
