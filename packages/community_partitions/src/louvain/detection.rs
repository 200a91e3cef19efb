// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use bumpalo::Bump;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::optimizer;
use crate::errors::CoreError;
use crate::graph::{Graph, WorkingGraph};
use crate::log;
use crate::partition::Partition;
use crate::progress_meter;
use crate::quality;

/// Runs `runs` independent greedy optimizations of `graph` and returns the
/// partition with the greatest modularity, together with that modularity.
///
/// Every run starts from a fresh singleton-aggregate copy of the graph with
/// its own PRNG, seeded from the injected `rng` up front; a fixed seed
/// therefore reproduces the result bit for bit. Every run from the first one
/// onward is scored against the original graph and compared; the first of
/// equals wins.
///
/// A graph with no edge weight needs no optimization: the all-singleton
/// partition with a modularity of 0 is returned without running anything.
/// A run that fails is skipped; detection fails only if every run does, while
/// malformed input (a negative edge weight) fails immediately instead of
/// being swallowed into a score.
pub fn detect_communities<T>(
    graph: &Graph,
    runs: usize,
    rng: &mut T,
) -> Result<(Partition, f64), CoreError>
where
    T: Rng + SeedableRng,
{
    let seeds: Vec<u64> = run_seeds(graph, runs, rng)?;
    if seeds.is_empty() {
        return Ok((Partition::singletons(graph)?, 0_f64));
    }
    log!(
        "running louvain {} times over a graph with {} nodes and {} edges with a total edge weight of {}",
        seeds.len(),
        graph.num_nodes(),
        graph.num_edges(),
        graph.total_edge_weight(),
    );
    let mut best: Option<(Partition, f64)> = None;
    for (run, seed) in seeds.iter().enumerate() {
        progress_meter!("{}% of runs complete", run, seeds.len());
        match single_run::<T>(graph, *seed) {
            Ok(scored) => retain_best(&mut best, scored),
            Err(err) => log!("run {} aborted: {:?}", run, err),
        }
    }
    return best.ok_or(CoreError::AllRunsFailedError);
}

/// Same contract as [`detect_communities`], with the runs fanned out over the
/// rayon thread pool. The per-run seeds are drawn identically, and the
/// results are compared in run order, so both drivers return bit-identical
/// partitions for the same input and seed.
pub fn par_detect_communities<T>(
    graph: &Graph,
    runs: usize,
    rng: &mut T,
) -> Result<(Partition, f64), CoreError>
where
    T: Rng + SeedableRng,
{
    let seeds: Vec<u64> = run_seeds(graph, runs, rng)?;
    if seeds.is_empty() {
        return Ok((Partition::singletons(graph)?, 0_f64));
    }
    let results: Vec<Result<(Partition, f64), CoreError>> = seeds
        .par_iter()
        .map(|seed| single_run::<T>(graph, *seed))
        .collect();
    let mut best: Option<(Partition, f64)> = None;
    for (run, result) in results.into_iter().enumerate() {
        match result {
            Ok(scored) => retain_best(&mut best, scored),
            Err(err) => log!("run {} aborted: {:?}", run, err),
        }
    }
    return best.ok_or(CoreError::AllRunsFailedError);
}

/// Validates the request and derives one PRNG seed per run. An empty seed
/// list means the degenerate no-edge-weight case: the caller should answer
/// with the trivial partition instead of optimizing.
fn run_seeds<T>(
    graph: &Graph,
    runs: usize,
    rng: &mut T,
) -> Result<Vec<u64>, CoreError>
where
    T: Rng,
{
    if runs == 0 {
        return Err(CoreError::ParameterRangeError);
    }
    graph.validate()?;
    if graph.total_edge_weight() == 0_f64 {
        return Ok(Vec::new());
    }
    let mut seeds: Vec<u64> = Vec::with_capacity(runs);
    for _ in 0..runs {
        seeds.push(rng.gen::<u64>());
    }
    return Ok(seeds);
}

fn single_run<T>(
    graph: &Graph,
    seed: u64,
) -> Result<(Partition, f64), CoreError>
where
    T: Rng + SeedableRng,
{
    let mut rng: T = T::seed_from_u64(seed);
    let arena: Bump = Bump::new();
    let mut working: WorkingGraph = WorkingGraph::from_graph(graph, &arena)?;
    optimizer::optimize(&mut working, graph.total_edge_weight(), &mut rng)?;
    let partition: Partition = Partition::from_working_graph(&working, graph.num_nodes())?;
    let score: f64 = quality::modularity(graph, &partition)?;
    return Ok((partition, score));
}

fn retain_best(
    best: &mut Option<(Partition, f64)>,
    candidate: (Partition, f64),
) {
    let replace: bool = match best {
        Some((_, best_quality)) => candidate.1 > *best_quality,
        None => true,
    };
    if replace {
        *best = Some(candidate);
    }
}
