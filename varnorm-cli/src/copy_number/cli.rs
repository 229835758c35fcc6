use clap::{Arg, Command, value_parser};

use crate::common::with_authority_args;

pub const CN_COUNT_CMD: &str = "hgvs-to-cn-count";
pub const CN_CHANGE_CMD: &str = "hgvs-to-cn-change";

pub fn create_cn_count_cli() -> Command {
    with_authority_args(
        Command::new(CN_COUNT_CMD)
            .about("Represent an HGVS duplication or deletion as a copy number count.")
            .arg(Arg::new("expression").required(true))
            .arg(
                Arg::new("baseline-copies")
                    .long("baseline-copies")
                    .required(true)
                    .value_parser(value_parser!(i64))
                    .allow_negative_numbers(true),
            ),
    )
}

pub fn create_cn_change_cli() -> Command {
    with_authority_args(
        Command::new(CN_CHANGE_CMD)
            .about("Represent an HGVS duplication or deletion as a copy number change.")
            .arg(Arg::new("expression").required(true))
            .arg(
                Arg::new("copy-change")
                    .long("copy-change")
                    .help("EFO copy change; defaults to loss for deletions and gain for duplications"),
            ),
    )
}
