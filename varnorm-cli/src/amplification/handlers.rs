use anyhow::{Result, anyhow};
use clap::ArgMatches;

use varnorm_core::Normalizer;

use crate::common::{Authorities, load_authorities, print_json};

pub fn run_amplification(matches: &ArgMatches) -> Result<()> {
    let gene = matches
        .get_one::<String>("gene")
        .ok_or_else(|| anyhow!("A gene symbol is required."))?;
    let sequence = matches.get_one::<String>("sequence").map(String::as_str);
    let start = matches.get_one::<u64>("start").copied();
    let end = matches.get_one::<u64>("end").copied();

    let Authorities {
        store,
        genes,
        config,
    } = load_authorities(matches)?;
    let normalizer = Normalizer::new(&store, &genes).with_config(config);

    print_json(&normalizer.amplification_to_copy_number_change(gene, sequence, start, end)?)
}
