// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use community_partitions::errors::CoreError;
use community_partitions::graph::{Graph, GraphBuilder};
use community_partitions::louvain::{detect_communities, par_detect_communities};
use community_partitions::partition::Partition;

use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use std::fs::File;
use std::io::prelude::*;
use std::time::Instant;

pub fn louvain(
    source_edges: &str,
    output_path: &str,
    separator: &str,
    source_index: usize,
    target_index: usize,
    weight_index: Option<usize>,
    seed: Option<u64>,
    runs: usize,
    parallel: bool,
    skip_first_line: bool,
) {
    let start_instant: Instant = Instant::now();
    let graph: Graph = GraphBuilder::new()
        .load_from_file(
            source_edges,
            separator,
            source_index,
            target_index,
            weight_index,
            skip_first_line,
        )
        .expect("Something went wrong loading the edge list")
        .build();

    let loaded_file_instant: Instant = Instant::now();

    let mut rng: XorShiftRng = match seed {
        Some(seed) => {
            println!("Using {} for PRNG seed", seed);
            XorShiftRng::seed_from_u64(seed)
        }
        None => XorShiftRng::from_entropy(),
    };

    let result: Result<(Partition, f64), CoreError> = if parallel {
        par_detect_communities(&graph, runs, &mut rng)
    } else {
        detect_communities(&graph, runs, &mut rng)
    };

    let detection_instant: Instant = Instant::now();
    match result {
        Ok((partition, modularity)) => {
            println!(
                "Louvain found {} communities over {} runs",
                partition.num_communities(),
                runs
            );
            for (index, community) in partition.communities().iter().enumerate() {
                println!("Community {} has {} nodes", index, community.size());
            }
            println!("Modularity: {:?}", modularity);
            println!("Output to {}", output_path);

            let assignment: Vec<usize> = partition
                .assignments()
                .expect("The partition claimed a node outside the graph");
            let mut output_file: File =
                File::create(output_path).expect("Unable to open output file for writing");
            for (node, community) in assignment.iter().enumerate() {
                let label: String = graph
                    .node_name(node)
                    .expect("A node index without a label should be impossible");
                write!(output_file, "{},{}\n", label, community)
                    .expect("Could not write entry to file");
            }
        }
        Err(err) => {
            println!("An error occurred when running louvain: {:?}", err);
        }
    }

    let file_writer_instant: Instant = Instant::now();
    println!(
        "Time to load file: {:?}",
        loaded_file_instant.duration_since(start_instant)
    );
    println!(
        "Time to run louvain: {:?}",
        detection_instant.duration_since(loaded_file_instant)
    );
    println!(
        "Time to output: {:?}",
        file_writer_instant.duration_since(detection_instant)
    );
    println!(
        "Total time: {:?}",
        file_writer_instant.duration_since(start_instant)
    );
}
