//! Parallel executor for running challenges

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use advent_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single part execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub name: &'static str,
    pub answer: Result<String, ArcExecutorError>,
    pub solve_duration: TimeDelta,
    /// Set on the first part solved from each parsed input
    pub parse_duration: Option<TimeDelta>,
}

/// Work item representing a challenge to execute
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub name: &'static str,
    pub parts: RangeInclusive<u8>,
}

/// Which registered challenges to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scope {
    pub year: Option<u16>,
    pub day: Option<u8>,
}

/// Parallel executor for running challenges
pub struct Executor {
    context: RunContext,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker thread needs, shared by reference
struct RunContext {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    scope: Scope,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config, scope: Scope) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            context: RunContext {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                scope,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let ctx = &self.context;
        ctx.registry
            .storage()
            .iter_info()
            .filter(|info| ctx.scope.year.is_none_or(|y| info.year == y))
            .filter(|info| ctx.scope.day.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                name: info.name,
                parts: filter_parts(ctx.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Execute all work items and send results to channel
    ///
    /// Load and solve failures travel inside [`SolverResult::answer`]; the
    /// returned error only covers the executor's own plumbing.
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let ctx = &self.context;

        match ctx.parallelize_by {
            ParallelizeBy::Sequential => run_group(&work_items, &tx, ctx).map_or(Ok(()), Err),
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.thread_pool.install(|| {
                    by_year
                        .par_iter()
                        .map(|items| run_group(items, &tx, ctx))
                        .reduce(|| None, merge_errors)
                        .map_or(Ok(()), Err)
                })
            }
            // Part additionally splits each challenge's parts in run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .par_iter()
                    .map(|work| run_work_item(work, &tx, ctx).err())
                    .reduce(|| None, merge_errors)
                    .map_or(Ok(()), Err)
            }),
        }
    }
}

/// Restrict a challenge's parts to the requested one, if any
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn merge_errors(
    first: Option<ArcExecutorError>,
    second: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match second {
        Some(second) => Some(ArcExecutorError::combine_opt(first, second)),
        None => first,
    }
}

/// Run items one after another, continuing past failures
fn run_group(
    items: &[WorkItem],
    tx: &Sender<SolverResult>,
    ctx: &RunContext,
) -> Option<ArcExecutorError> {
    items
        .iter()
        .filter_map(|work| run_work_item(work, tx, ctx).err())
        .reduce(ArcExecutorError::combine)
}

fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    ctx: &RunContext,
) -> Result<(), ArcExecutorError> {
    let input = match ctx.inputs.read(work.year, work.day) {
        Ok(input) => input,
        Err(source) => {
            tracing::debug!(year = work.year, day = work.day, "input unavailable");
            let error = ExecutorError::Input {
                year: work.year,
                day: work.day,
                source,
            };
            return send_failure(work, tx, error.into());
        }
    };

    if matches!(ctx.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, ctx)
    } else {
        run_parts_sequential(work, &input, tx, ctx)
    }
}

/// Parse once, then solve each part in order
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    ctx: &RunContext,
) -> Result<(), ArcExecutorError> {
    let mut solver = match ctx.registry.create_solver(work.year, work.day, input) {
        Ok(solver) => solver,
        Err(e) => return send_failure(work, tx, ExecutorError::from(e).into()),
    };

    for (idx, part) in work.parts.clone().enumerate() {
        let mut result = solve_part(work, part, &mut *solver);
        if idx > 0 {
            result.parse_duration = None;
        }
        tx.send(result).map_err(|_| ExecutorError::ChannelSend)?;
    }
    Ok(())
}

/// Solve parts in parallel, each from its own freshly parsed instance
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    ctx: &RunContext,
) -> Result<(), ArcExecutorError> {
    work.parts
        .clone()
        .into_par_iter()
        .try_for_each_with(tx.clone(), |tx, part| -> Result<(), ArcExecutorError> {
            let result = match ctx.registry.create_solver(work.year, work.day, input) {
                Ok(mut solver) => solve_part(work, part, &mut *solver),
                Err(e) => error_result(work, part, ExecutorError::from(e).into()),
            };
            tx.send(result)
                .map_err(|_| ExecutorError::ChannelSend.into())
        })
}

/// Report one failure against every requested part of a challenge
fn send_failure(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    error: ArcExecutorError,
) -> Result<(), ArcExecutorError> {
    for part in work.parts.clone() {
        tx.send(error_result(work, part, error.clone()))
            .map_err(|_| ExecutorError::ChannelSend)?;
    }
    Ok(())
}

fn error_result(work: &WorkItem, part: u8, error: ArcExecutorError) -> SolverResult {
    SolverResult {
        year: work.year,
        day: work.day,
        part,
        name: work.name,
        answer: Err(error),
        solve_duration: TimeDelta::zero(),
        parse_duration: None,
    }
}

fn solve_part(work: &WorkItem, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let parse_duration = Some(solver.parse_duration());
    match solver.solve(part) {
        Ok(solved) => SolverResult {
            year: work.year,
            day: work.day,
            part,
            name: work.name,
            solve_duration: solved.duration(),
            answer: Ok(solved.answer),
            parse_duration,
        },
        Err(e) => SolverResult {
            parse_duration,
            ..error_result(work, part, ExecutorError::from(advent_solver::SolverError::from(e)).into())
        },
    }
}
