use anyhow::{Result, anyhow};
use clap::ArgMatches;

use varnorm_core::Normalizer;
use varnorm_core::assemble::parse_copy_change;

use crate::common::{Authorities, load_authorities, print_json};

fn expression(matches: &ArgMatches) -> Result<&String> {
    matches
        .get_one::<String>("expression")
        .ok_or_else(|| anyhow!("An HGVS expression is required."))
}

pub fn run_cn_count(matches: &ArgMatches) -> Result<()> {
    let expression = expression(matches)?;
    let baseline_copies = *matches
        .get_one::<i64>("baseline-copies")
        .ok_or_else(|| anyhow!("--baseline-copies is required."))?;

    let Authorities {
        store,
        genes,
        config,
    } = load_authorities(matches)?;
    let normalizer = Normalizer::new(&store, &genes).with_config(config);

    print_json(&normalizer.hgvs_to_copy_number_count(expression, baseline_copies)?)
}

pub fn run_cn_change(matches: &ArgMatches) -> Result<()> {
    let expression = expression(matches)?;
    let copy_change = matches
        .get_one::<String>("copy-change")
        .map(|value| parse_copy_change(value))
        .transpose()?;

    let Authorities {
        store,
        genes,
        config,
    } = load_authorities(matches)?;
    let normalizer = Normalizer::new(&store, &genes).with_config(config);

    print_json(&normalizer.hgvs_to_copy_number_change(expression, copy_change)?)
}
