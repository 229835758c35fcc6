use clap::{Arg, Command, value_parser};

use crate::common::with_authority_args;

pub const AMPLIFICATION_CMD: &str = "amplification";

pub fn create_amplification_cli() -> Command {
    with_authority_args(
        Command::new(AMPLIFICATION_CMD)
            .about("Represent a gene amplification as a copy number change.")
            .arg(Arg::new("gene").required(true))
            .arg(
                Arg::new("sequence")
                    .long("sequence")
                    .requires_all(["start", "end"])
                    .help("Use this sequence instead of the gene's location"),
            )
            .arg(
                Arg::new("start")
                    .long("start")
                    .value_parser(value_parser!(u64))
                    .requires("sequence")
                    .help("1-based first residue"),
            )
            .arg(
                Arg::new("end")
                    .long("end")
                    .value_parser(value_parser!(u64))
                    .requires("sequence")
                    .help("1-based last residue"),
            ),
    )
}
