// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use clap::ArgMatches;
use std::convert::TryFrom;
use std::num::ParseIntError;

pub const SOURCE_EDGES: &str = "EDGE_LIST_FILE";
pub const OUTPUT: &str = "OUTPUT_PATH";
pub const SEPARATOR: &str = "separator";
pub const SOURCE_INDEX: &str = "source_index";
pub const TARGET_INDEX: &str = "target_index";
pub const WEIGHT_INDEX: &str = "weight_index";
pub const SEED: &str = "seed";
pub const RUNS: &str = "runs";
pub const PARALLEL: &str = "parallel";
pub const HAS_HEADER: &str = "has_header";

pub struct CliArgs {
    pub source_edges: String,
    pub output_path: String,
    pub separator: String,
    pub source_index: usize,
    pub target_index: usize,
    pub weight_index: Option<usize>,
    pub seed: Option<u64>,
    pub runs: usize,
    pub parallel: bool,
    pub skip_first_line: bool,
}

impl TryFrom<ArgMatches> for CliArgs {
    type Error = ParseCliError;

    fn try_from(matches: ArgMatches) -> Result<Self, Self::Error> {
        let source_edges: String = matches
            .get_one::<String>(SOURCE_EDGES)
            .cloned()
            .ok_or(ParseCliError::RequiredValueError)?;
        let output_path: String = matches
            .get_one::<String>(OUTPUT)
            .cloned()
            .ok_or(ParseCliError::RequiredValueError)?;
        let separator: String = matches
            .get_one::<String>(SEPARATOR)
            .cloned()
            .ok_or(ParseCliError::RequiredValueError)?;
        let source_index: usize = matches
            .get_one::<String>(SOURCE_INDEX)
            .ok_or(ParseCliError::RequiredValueError)?
            .parse::<usize>()?;
        let target_index: usize = matches
            .get_one::<String>(TARGET_INDEX)
            .ok_or(ParseCliError::RequiredValueError)?
            .parse::<usize>()?;
        let weight_index: Option<usize> = match matches.get_one::<String>(WEIGHT_INDEX) {
            Some(raw_weight_index) => Some(raw_weight_index.parse::<usize>()?),
            None => None,
        };
        let seed: Option<u64> = match matches.get_one::<String>(SEED) {
            Some(raw_seed) => Some(raw_seed.parse::<u64>()?),
            None => None,
        };
        let runs: usize = matches
            .get_one::<String>(RUNS)
            .ok_or(ParseCliError::RequiredValueError)?
            .parse::<usize>()?;
        let parallel: bool = matches.get_flag(PARALLEL);
        let skip_first_line: bool = matches.get_flag(HAS_HEADER);
        let cli_args: CliArgs = CliArgs {
            source_edges,
            output_path,
            separator,
            source_index,
            target_index,
            weight_index,
            seed,
            runs,
            parallel,
            skip_first_line,
        };
        return Ok(cli_args);
    }
}

#[derive(Debug)]
pub enum ParseCliError {
    RequiredValueError,
    NotANumber,
}

impl From<ParseIntError> for ParseCliError {
    fn from(_: ParseIntError) -> Self {
        return ParseCliError::NotANumber;
    }
}
