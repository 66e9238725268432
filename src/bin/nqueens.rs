//! Command-line entry point.
//!
//! `nqueens --algorithm <naive|min-conflicts|genetic> -n <N>`
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (e.g. `RUST_LOG=u_nqueens=debug`).

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command};
use tracing_subscriber::EnvFilter;
use u_nqueens::genetic::{CalibrationTable, FixedMutationRate, GeneticSolver, MutationRateModel};
use u_nqueens::min_conflicts::{MinConflictsConfig, MinConflictsSolver};
use u_nqueens::{ExhaustiveSolver, NQueensSolver};

fn command() -> Command {
    Command::new("nqueens")
        .about("Solve the N-Queens problem with a choice of algorithm")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("algorithm")
                .short('a')
                .long("algorithm")
                .help("Algorithm to use")
                .required(true)
                .value_parser(["naive", "min-conflicts", "genetic"]),
        )
        .arg(
            Arg::new("n")
                .short('n')
                .long("size")
                .help("Board size (number of queens)")
                .required(true)
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Random seed for reproducible runs")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("max-steps")
                .long("max-steps")
                .help("Step budget for min-conflicts")
                .value_parser(value_parser!(usize))
                .default_value(DEFAULT_MAX_STEPS),
        )
        .arg(
            Arg::new("no-step-limit")
                .long("no-step-limit")
                .help("Run min-conflicts until it finds a solution")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("mutation-rate")
                .long("mutation-rate")
                .help("Fixed mutation rate for the genetic algorithm")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("calibration")
                .long("calibration")
                .value_name("FILE")
                .help("TOML dataset used to pick the genetic mutation rate [default: bundled]")
                .value_parser(value_parser!(PathBuf)),
        )
        .group(
            ArgGroup::new("rate-source")
                .args(["mutation-rate", "calibration"])
                .multiple(false),
        )
}

const DEFAULT_MAX_STEPS: &str = "1000";

/// Measurements shipped with the crate.
const BUNDLED_CALIBRATION: &str = include_str!("../../data/mutation_rates.toml");

fn rate_model(matches: &ArgMatches) -> u_nqueens::Result<Box<dyn MutationRateModel>> {
    if let Some(&rate) = matches.get_one::<f64>("mutation-rate") {
        return Ok(Box::new(FixedMutationRate::new(rate)?));
    }
    let table = match matches.get_one::<PathBuf>("calibration") {
        Some(path) => CalibrationTable::from_path(path)?,
        None => CalibrationTable::from_toml_str(BUNDLED_CALIBRATION)?,
    };
    Ok(Box::new(table))
}

fn build_solver(matches: &ArgMatches) -> u_nqueens::Result<Box<dyn NQueensSolver>> {
    let n = *matches.get_one::<usize>("n").expect("required by clap");
    let seed = matches.get_one::<u64>("seed").copied();
    let algorithm = matches
        .get_one::<String>("algorithm")
        .expect("required by clap");

    let solver: Box<dyn NQueensSolver> = match algorithm.as_str() {
        "min-conflicts" => {
            let max_steps = *matches
                .get_one::<usize>("max-steps")
                .expect("defaulted by clap");
            let config = MinConflictsConfig {
                max_steps,
                limit_steps: !matches.get_flag("no-step-limit"),
                seed,
            };
            Box::new(MinConflictsSolver::new(n, config)?)
        }
        "genetic" => {
            let model = rate_model(matches)?;
            Box::new(GeneticSolver::with_model(n, &model, seed)?)
        }
        "naive" => Box::new(ExhaustiveSolver::new(n)?),
        other => unreachable!("clap rejects algorithm {other:?}"),
    };
    Ok(solver)
}

fn header(algorithm: &str) -> &'static str {
    match algorithm {
        "min-conflicts" => "Min-conflicts",
        "genetic" => "Genetic algorithm",
        _ => "Naive",
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();
    let start = Instant::now();

    let mut solver = match build_solver(&matches) {
        Ok(solver) => solver,
        Err(err) => {
            tracing::error!(%err, "could not build solver");
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let solved = solver.solve();
    println!("{} solution for {}-queens:", header(solver.name()), solver.board_size());
    print!("{}", solver.report());
    println!(
        "Execution time: {:.8} seconds.",
        start.elapsed().as_secs_f64()
    );

    if solved {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ArgMatches, clap::Error> {
        command().try_get_matches_from(std::iter::once("nqueens").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn test_naive() {
        let matches = parse(&["-a", "naive", "-n", "4"]).unwrap();
        let mut solver = build_solver(&matches).unwrap();
        assert_eq!(solver.name(), "naive");
        assert!(solver.solve());
    }

    #[test]
    fn test_min_conflicts_options() {
        let matches = parse(&[
            "-a",
            "min-conflicts",
            "-n",
            "6",
            "--seed",
            "3",
            "--max-steps",
            "50",
        ])
        .unwrap();
        let solver = build_solver(&matches).unwrap();
        assert_eq!(solver.name(), "min-conflicts");
        assert_eq!(solver.board_size(), 6);
    }

    #[test]
    fn test_genetic_defaults_to_bundled_calibration() {
        let matches = parse(&["-a", "genetic", "-n", "5"]).unwrap();
        let mut solver = build_solver(&matches).unwrap();
        assert_eq!(solver.name(), "genetic");
        assert_eq!(solver.board_size(), 5);
        assert_eq!(solver.report().progress, u_nqueens::Progress::Generations { taken: 0 });

        let bundled = CalibrationTable::from_toml_str(BUNDLED_CALIBRATION).unwrap();
        assert_eq!(bundled.samples().len(), 5);
        solver.solve();
        assert!(solver.report().placement.is_some());
    }

    #[test]
    fn test_rate_sources_are_exclusive() {
        assert!(parse(&[
            "-a",
            "genetic",
            "-n",
            "5",
            "--mutation-rate",
            "0.5",
            "--calibration",
            "x.toml"
        ])
        .is_err());
    }

    #[test]
    fn test_genetic_with_fixed_rate() {
        let matches = parse(&["-a", "genetic", "-n", "5", "--mutation-rate", "0.9"]).unwrap();
        let solver = build_solver(&matches).unwrap();
        assert_eq!(solver.name(), "genetic");
    }

    #[test]
    fn test_genetic_with_bad_rate() {
        let matches = parse(&["-a", "genetic", "-n", "5", "--mutation-rate", "1.5"]).unwrap();
        assert!(build_solver(&matches).is_err());
    }

    #[test]
    fn test_genetic_with_missing_calibration_file() {
        let matches = parse(&["-a", "genetic", "-n", "5", "--calibration", "missing.toml"]).unwrap();
        assert!(matches!(
            build_solver(&matches),
            Err(u_nqueens::Error::Calibration(_))
        ));
    }

    #[test]
    fn test_header_matches_solver_name() {
        assert_eq!(header(ExhaustiveSolver::NAME), "Naive");
        assert_eq!(header("min-conflicts"), "Min-conflicts");
        assert_eq!(header("genetic"), "Genetic algorithm");
    }

    #[test]
    fn test_unknown_algorithm() {
        assert!(parse(&["-a", "annealing", "-n", "5"]).is_err());
    }

    #[test]
    fn test_size_is_required() {
        assert!(parse(&["-a", "naive"]).is_err());
        assert!(parse(&["-n", "4"]).is_err());
    }

    #[test]
    fn test_zero_size() {
        let matches = parse(&["-a", "naive", "-n", "0"]).unwrap();
        assert!(matches!(
            build_solver(&matches),
            Err(u_nqueens::Error::InvalidBoardSize(0))
        ));
    }
}
