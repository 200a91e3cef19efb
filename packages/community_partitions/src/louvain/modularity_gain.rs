// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

/// The marginal change in modularity from merging an aggregate into one of
/// its neighbors, under the Newman-Girvan null model:
///
/// `gain = k_i_in / m - (sigma_tot * k_i) / (2 * m^2)`
///
/// where `k_i_in` is the weight of the edge between the two, `k_i` and
/// `sigma_tot` are the maintained total weighted degrees of the moving
/// aggregate and the candidate neighbor, and `m` is the total edge weight of
/// the original graph. O(1) given the maintained degrees.
pub fn calculate(
    edge_weight_between: f64,
    aggregate_degree: f64,
    neighbor_degree: f64,
    total_edge_weight: f64,
) -> f64 {
    return edge_weight_between / total_edge_weight
        - (neighbor_degree * aggregate_degree)
            / (2_f64 * total_edge_weight * total_edge_weight);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_computed_gain() {
        // two singletons of degree 1 joined by the only weight-1 edge of a
        // graph with m = 2: 1/2 - (1*1)/(2*4)
        let gain: f64 = calculate(1.0, 1.0, 1.0, 2.0);
        assert!((gain - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_gain_can_be_negative() {
        let gain: f64 = calculate(1.0, 4.0, 4.0, 7.0);
        assert!(gain < 0_f64);
    }
}
