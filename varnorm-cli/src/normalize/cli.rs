use clap::{Arg, Command, value_parser};

use varnorm_core::AmbiguityMode;

use crate::common::with_authority_args;

pub const NORMALIZE_CMD: &str = "normalize";

pub fn create_normalize_cli() -> Command {
    with_authority_args(
        Command::new(NORMALIZE_CMD)
            .about("Normalize an expression, choosing how duplications and deletions are represented.")
            .arg(Arg::new("expression").required(true))
            .arg(
                Arg::new("mode")
                    .long("mode")
                    .value_parser(|s: &str| s.parse::<AmbiguityMode>())
                    .help("default, trim, allele, copy_number_count or copy_number_change"),
            )
            .arg(
                Arg::new("baseline-copies")
                    .long("baseline-copies")
                    .value_parser(value_parser!(i64))
                    .allow_negative_numbers(true),
            )
            .arg(
                Arg::new("copy-change")
                    .long("copy-change")
                    .help("EFO copy change, e.g. EFO:0030067 or loss"),
            ),
    )
}
