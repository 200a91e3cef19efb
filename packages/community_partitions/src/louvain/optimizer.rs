// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use rand::Rng;

use super::modularity_gain;
use crate::errors::CoreError;
use crate::graph::WorkingGraph;
use crate::log;

/// Runs the greedy merge loop of a single run to its local optimum.
///
/// The handle list is put into one uniform random order up front (the
/// ordering is what distinguishes independent runs), then full passes over
/// that order repeat until a pass performs no merge. Each merge retires a
/// handle, so later passes simply skip the dead entries; the loop terminates
/// after at most |V| - 1 merges.
pub fn optimize<T>(
    working: &mut WorkingGraph,
    total_edge_weight: f64,
    rng: &mut T,
) -> Result<(), CoreError>
where
    T: Rng,
{
    let order: Vec<usize> = handles_in_random_order(working.num_slots(), rng);
    let mut passes: usize = 0;
    let mut converged: bool = false;
    while !converged {
        converged = true;
        passes += 1;
        for position in 0..order.len() {
            let current: usize = order[position];
            if !working.is_live(current) {
                continue;
            }
            if let Some(destination) = best_merge_for(working, current, total_edge_weight)? {
                working.merge(current, destination)?;
                converged = false;
            }
        }
    }
    log!(
        "optimizer converged after {} passes with {} aggregates remaining",
        passes,
        working.num_live()
    );
    return Ok(());
}

/// The neighbor with the strictly greatest modularity gain, or None when the
/// aggregate has no neighbors or no move has positive gain. Ties keep the
/// first-seen neighbor, so the choice is deterministic for a given adjacency
/// order.
fn best_merge_for(
    working: &WorkingGraph,
    current: usize,
    total_edge_weight: f64,
) -> Result<Option<usize>, CoreError> {
    let neighbors: &[(usize, f64)] = working.neighbors(current)?;
    if neighbors.is_empty() {
        // isolated: terminal for this aggregate
        return Ok(None);
    }
    let current_degree: f64 = working.aggregate(current)?.total_weighted_degree();

    let (first_neighbor, first_edge_weight) = neighbors[0];
    let mut best_destination: usize = first_neighbor;
    let mut best_gain: f64 = modularity_gain::calculate(
        first_edge_weight,
        current_degree,
        working.aggregate(first_neighbor)?.total_weighted_degree(),
        total_edge_weight,
    );
    for (neighbor, edge_weight) in neighbors[1..].iter() {
        let gain: f64 = modularity_gain::calculate(
            *edge_weight,
            current_degree,
            working.aggregate(*neighbor)?.total_weighted_degree(),
            total_edge_weight,
        );
        if gain > best_gain {
            best_destination = *neighbor;
            best_gain = gain;
        }
    }

    return if best_gain > 0_f64 {
        Ok(Some(best_destination))
    } else {
        Ok(None)
    };
}

/// Generates a Vec of length `length`, initially populated with values from
/// 0..length, then executes `length` swaps between the current position and
/// an index chosen at random.
fn handles_in_random_order<T>(
    length: usize,
    rng: &mut T,
) -> Vec<usize>
where
    T: Rng,
{
    let mut permutation: Vec<usize> = Vec::with_capacity(length);
    for i in 0..length {
        permutation.push(i);
    }
    for i in 0..length {
        let random_index: usize = rng.gen_range(0..length);
        let old_value: usize = permutation[i];
        permutation[i] = permutation[random_index];
        permutation[random_index] = old_value;
    }
    return permutation;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, GraphBuilder};
    use bumpalo::Bump;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn optimized(graph: &Graph, seed: u64) -> Vec<Vec<usize>> {
        let arena: Bump = Bump::new();
        let mut working: WorkingGraph = WorkingGraph::from_graph(graph, &arena).unwrap();
        let mut rng: XorShiftRng = XorShiftRng::seed_from_u64(seed);
        optimize(&mut working, graph.total_edge_weight(), &mut rng).unwrap();
        let mut communities: Vec<Vec<usize>> = Vec::with_capacity(working.num_live());
        for handle in working.live_handles() {
            let mut members: Vec<usize> = working.aggregate(handle).unwrap().members().to_vec();
            members.sort_unstable();
            communities.push(members);
        }
        communities.sort();
        return communities;
    }

    #[test]
    fn test_two_pair_graph_converges_to_pairs() {
        let graph: Graph = GraphBuilder::new()
            .add_edge_into("a", "b", 1.0)
            .add_edge_into("c", "d", 1.0)
            .build();
        // every permutation leads to the same local optimum here
        for seed in 0..8_u64 {
            let communities: Vec<Vec<usize>> = optimized(&graph, seed);
            assert_eq!(vec![vec![0, 1], vec![2, 3]], communities);
        }
    }

    #[test]
    fn test_tightly_knit_triangles_with_bridge_recover_under_any_order() {
        // intra-triangle weight 2 against a weight-1 bridge: no permutation
        // of the greedy pass can make a cross-bridge merge the best move, so
        // a single run recovers the triangles whatever the seed
        let graph: Graph = GraphBuilder::new()
            .add_edge_into("a", "b", 2.0)
            .add_edge_into("b", "c", 2.0)
            .add_edge_into("c", "a", 2.0)
            .add_edge_into("d", "e", 2.0)
            .add_edge_into("e", "f", 2.0)
            .add_edge_into("f", "d", 2.0)
            .add_edge_into("c", "d", 1.0)
            .build();
        for seed in 0..8_u64 {
            let communities: Vec<Vec<usize>> = optimized(&graph, seed);
            assert_eq!(vec![vec![0, 1, 2], vec![3, 4, 5]], communities);
        }
    }

    #[test]
    fn test_edgeless_graph_converges_immediately() {
        let graph: Graph = GraphBuilder::new()
            .add_node("a")
            .add_node("b")
            .add_node("c")
            .build();
        let communities: Vec<Vec<usize>> = optimized(&graph, 1234);
        assert_eq!(vec![vec![0], vec![1], vec![2]], communities);
    }

    #[test]
    fn test_live_count_never_increases() {
        let graph: Graph = GraphBuilder::new()
            .add_edge_into("a", "b", 3.0)
            .add_edge_into("b", "c", 3.0)
            .add_edge_into("c", "a", 3.0)
            .add_edge_into("c", "d", 1.0)
            .build();
        let arena: Bump = Bump::new();
        let mut working: WorkingGraph = WorkingGraph::from_graph(&graph, &arena).unwrap();
        let mut rng: XorShiftRng = XorShiftRng::seed_from_u64(99);
        let before: usize = working.num_live();
        optimize(&mut working, graph.total_edge_weight(), &mut rng).unwrap();
        assert!(working.num_live() <= before);
        assert!(working.num_live() >= 1);
    }
}
