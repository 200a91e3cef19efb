// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use crate::errors::CoreError;
use crate::graph::Graph;
use crate::partition::Partition;

/// Newman-Girvan modularity of `partition`, computed against the *original*
/// graph rather than any run's working copy:
///
/// `Q = (1 / 2m) * [ sum of intra-community A_ij over ordered pairs
///                   - sum over communities of K_C^2 / 2m ]`
///
/// where `K_C` is the summed weighted degree of a community's members. An
/// edgeless graph has no defined modularity; it is reported as 0 rather than
/// a NaN.
pub fn modularity(
    graph: &Graph,
    partition: &Partition,
) -> Result<f64, CoreError> {
    if partition.num_leaves() != graph.num_nodes() {
        return Err(CoreError::AggregateIndexingError);
    }
    let total_edge_weight: f64 = graph.total_edge_weight();
    if total_edge_weight == 0_f64 {
        return Ok(0_f64);
    }

    let assignment: Vec<usize> = partition.assignments()?;

    let mut quality: f64 = 0_f64;
    for node in 0..graph.num_nodes() {
        let node_community: usize = assignment[node];
        let (neighbors, weights): (&[usize], &[f64]) = graph.edges_for(node)?;
        for i in 0..neighbors.len() {
            if assignment[neighbors[i]] == node_community {
                quality += weights[i];
            }
        }
        // the A_ii term; a self loop is intra-community by definition
        quality += graph.self_loop_weight_at(node)?;
    }

    let mut community_degrees: Vec<f64> = vec![0_f64; partition.num_communities()];
    for node in 0..graph.num_nodes() {
        community_degrees[assignment[node]] += graph.node_weight_at(node)?;
    }
    for community_degree in community_degrees {
        quality -= community_degree * community_degree / (2_f64 * total_edge_weight);
    }

    quality = quality / (2_f64 * total_edge_weight);

    return if quality.is_nan() {
        Ok(0_f64)
    } else {
        Ok(quality)
    };
}
