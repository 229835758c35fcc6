use anyhow::{Result, anyhow};
use clap::ArgMatches;

use varnorm_core::assemble::parse_copy_change;
use varnorm_core::{AmbiguityMode, NormalizeOptions, Normalizer};

use crate::common::{Authorities, load_authorities, print_json};

pub fn run_normalize(matches: &ArgMatches) -> Result<()> {
    let expression = matches
        .get_one::<String>("expression")
        .ok_or_else(|| anyhow!("An expression is required."))?;

    let Authorities {
        store,
        genes,
        config,
    } = load_authorities(matches)?;
    let options = NormalizeOptions {
        mode: matches
            .get_one::<AmbiguityMode>("mode")
            .copied()
            .unwrap_or(config.default_mode),
        baseline_copies: matches.get_one::<i64>("baseline-copies").copied(),
        copy_change: matches
            .get_one::<String>("copy-change")
            .map(|value| parse_copy_change(value))
            .transpose()?,
    };
    let normalizer = Normalizer::new(&store, &genes).with_config(config);

    print_json(&normalizer.normalize_with(expression, &options)?)
}
