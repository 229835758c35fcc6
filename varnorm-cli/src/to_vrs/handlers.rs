use anyhow::{Result, anyhow};
use clap::ArgMatches;

use varnorm_core::Normalizer;

use crate::common::{Authorities, load_authorities, print_json};

pub fn run_to_vrs(matches: &ArgMatches) -> Result<()> {
    let expression = matches
        .get_one::<String>("expression")
        .ok_or_else(|| anyhow!("An expression is required."))?;

    let Authorities {
        store,
        genes,
        config,
    } = load_authorities(matches)?;
    let normalizer = Normalizer::new(&store, &genes).with_config(config);

    print_json(&normalizer.to_vrs(expression)?)
}
