use clap::{Arg, Command};

use crate::common::with_authority_args;

pub const TO_VRS_CMD: &str = "to-vrs";

pub fn create_to_vrs_cli() -> Command {
    with_authority_args(
        Command::new(TO_VRS_CMD)
            .about("Translate an expression to a VRS variation using the configured default mode.")
            .arg(Arg::new("expression").required(true)),
    )
}
