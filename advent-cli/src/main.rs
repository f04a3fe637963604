//! AOC CLI - Command-line interface for running Advent of Code challenges

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;
mod selection;

// Import advent-challenges to link the solver plugins
use advent_challenges as _;

use advent_solver::{SolverFactoryStorage, SolverRegistry, SolverRegistryBuilder};
use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::Args;
use config::{Config, Target};
use error::CliError;
use executor::{Executor, Scope};
use itertools::Itertools;
use output::OutputFormatter;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

/// `info` by default, `debug` with `--debug`; `RUST_LOG` overrides both
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let registry = build_registry(&args.tags)?;
    if registry.storage().is_empty() {
        return Err(CliError::NoChallenges);
    }
    log_available(registry.storage());

    let config = Config::from_args(args)?;
    let scope = resolve_scope(&config.target, registry.storage(), Local::now().date_naive())?;

    let executor = Executor::new(registry, &config, scope).map_err(|e| CliError::Executor(e.into()))?;
    if executor.collect_work_items().is_empty() {
        return Err(CliError::NothingSelected);
    }

    run_executor(executor, config.quiet)
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}

/// Log registered challenges, newest year first
fn log_available(storage: &SolverFactoryStorage) {
    tracing::info!("Available challenges:");
    let by_year: Vec<(u16, String)> = storage
        .iter_info()
        .chunk_by(|info| info.year)
        .into_iter()
        .map(|(year, infos)| (year, infos.map(|info| format!("{:02}", info.day)).join(", ")))
        .collect();

    for (year, days) in by_year.iter().rev() {
        tracing::info!("{}: {}", year, days);
    }
}

/// Turn the requested target into a registry filter
fn resolve_scope(
    target: &Target,
    storage: &SolverFactoryStorage,
    today: NaiveDate,
) -> Result<Scope, CliError> {
    match target {
        Target::All { year } => Ok(Scope {
            year: *year,
            day: None,
        }),
        Target::Single(selection) => {
            let (year, day) = selection
                .key(storage, today)
                .filter(|&(year, day)| storage.contains(year, day))
                .ok_or_else(|| CliError::NotFound(selection.to_string()))?;

            tracing::info!("Selected challenge from year {}, day {}.", year, day);
            Ok(Scope {
                year: Some(year),
                day: Some(day),
            })
        }
    }
}

/// Run the executor and print results as they become available in order
fn run_executor(executor: Executor, quiet: bool) -> Result<(), CliError> {
    let work_items = executor.collect_work_items();
    tracing::info!("Running {} challenge(s)...", work_items.len());

    let expected_keys = work_items.iter().flat_map(|w| {
        w.parts.clone().map(move |p| aggregator::ResultKey {
            year: w.year,
            day: w.day,
            part: p,
        })
    });

    let (tx, rx) = std::sync::mpsc::channel();
    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    std::thread::scope(|s| {
        let executor_handle = s.spawn(|| executor.execute(tx));

        for result in rx {
            for ready in aggregator.add(result) {
                formatter.print_result(&ready);
                results.push(ready);
            }
        }

        for ready in aggregator.drain() {
            formatter.print_result(&ready);
            results.push(ready);
        }

        if !aggregator.is_complete() {
            tracing::warn!("Not all expected results were received");
        }

        executor_handle
            .join()
            .map_err(|_| CliError::Config("Executor thread panicked".to_string()))?
            .map_err(CliError::Executor)
    })?;

    formatter.print_summary(&results);

    let failed = results.iter().filter(|r| r.answer.is_err()).count();
    if failed > 0 {
        return Err(CliError::Failed {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}
