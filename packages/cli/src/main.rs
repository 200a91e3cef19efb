// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use clap::{Arg, ArgAction, Command};
use std::convert::TryFrom;

mod args;
mod louvain;

use crate::args::*;

fn main() {
    let matches = Command::new("louvain_cli")
        .version("0.1.0")
        .about("Runs louvain community detection over a provided edge list and outputs the communities found")
        .arg(
            Arg::new(SOURCE_EDGES)
                .help("The edge list that defines the graph's connections")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new(OUTPUT)
                .help("The output for the communities detected")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new(SEPARATOR)
                .short('s')
                .help("The character to split the edge list on")
                .action(ArgAction::Set)
                .default_value("\t"),
        )
        .arg(
            Arg::new(SOURCE_INDEX)
                .long("source_index")
                .action(ArgAction::Set)
                .help("0-based index of source column from edge file")
                .default_value("0"),
        )
        .arg(
            Arg::new(TARGET_INDEX)
                .long("target_index")
                .action(ArgAction::Set)
                .help("0-based index of target column from edge file")
                .default_value("1"),
        )
        .arg(
            Arg::new(WEIGHT_INDEX)
                .long("weight_index")
                .action(ArgAction::Set)
                .help("0-based index of weight column from edge file; every edge weighs 1 if omitted"),
        )
        .arg(
            Arg::new(SEED)
                .action(ArgAction::Set)
                .help("A seed value to start the PRNG")
                .long("seed"),
        )
        .arg(
            Arg::new(RUNS)
                .action(ArgAction::Set)
                .help("Louvain is a greedy algorithm whose result depends on a randomized vertex order. Requesting n > 1 runs executes n independent orderings and keeps the partition whose modularity against the input graph is highest")
                .short('n')
                .long("runs")
                .default_value("1"),
        )
        .arg(
            Arg::new(PARALLEL)
                .help("Execute the independent runs on a thread pool instead of serially")
                .long("parallel")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(HAS_HEADER)
                .help("Flag must be added if the source file contains a header line")
                .long("has_header")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    match CliArgs::try_from(matches) {
        Ok(cli_args) => louvain::louvain(
            &cli_args.source_edges,
            &cli_args.output_path,
            &cli_args.separator,
            cli_args.source_index,
            cli_args.target_index,
            cli_args.weight_index,
            cli_args.seed,
            cli_args.runs,
            cli_args.parallel,
            cli_args.skip_first_line,
        ),
        Err(err) => println!("{:?}", err),
    }
}
