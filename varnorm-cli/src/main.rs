mod amplification;
mod common;
mod copy_number;
mod normalize;
mod to_vrs;

use anyhow::{Result, anyhow};
use clap::{Arg, ArgAction, Command};
use log::Level;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "varnorm";
    pub const BIN_NAME: &str = "varnorm";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Normalize genetic variant descriptions into GA4GH VRS variations.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug messages"),
        )
        .subcommand(to_vrs::cli::create_to_vrs_cli())
        .subcommand(normalize::cli::create_normalize_cli())
        .subcommand(copy_number::cli::create_cn_count_cli())
        .subcommand(copy_number::cli::create_cn_change_cli())
        .subcommand(amplification::cli::create_amplification_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    let level = if matches.get_flag("verbose") {
        Level::Debug
    } else {
        Level::Info
    };
    simple_logger::init_with_level(level).map_err(|e| anyhow!("Failed to start logging: {}", e))?;

    match matches.subcommand() {
        //
        // TO VRS
        //
        Some((to_vrs::cli::TO_VRS_CMD, matches)) => {
            to_vrs::handlers::run_to_vrs(matches)?;
        }

        //
        // NORMALIZE
        //
        Some((normalize::cli::NORMALIZE_CMD, matches)) => {
            normalize::handlers::run_normalize(matches)?;
        }

        //
        // HGVS DUP/DEL TO COPY NUMBER
        //
        Some((copy_number::cli::CN_COUNT_CMD, matches)) => {
            copy_number::handlers::run_cn_count(matches)?;
        }
        Some((copy_number::cli::CN_CHANGE_CMD, matches)) => {
            copy_number::handlers::run_cn_change(matches)?;
        }

        //
        // AMPLIFICATION
        //
        Some((amplification::cli::AMPLIFICATION_CMD, matches)) => {
            amplification::handlers::run_amplification(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[test]
    fn parses_normalize_options() {
        let matches = build_parser()
            .try_get_matches_from([
                "varnorm",
                "-v",
                "normalize",
                "NC_000007.14:g.7_8del",
                "--fasta",
                "ref.fa",
                "--aliases",
                "GRCh38=grch38.tsv",
                "--mode",
                "copy_number_count",
                "--baseline-copies",
                "2",
            ])
            .unwrap();
        assert!(matches.get_flag("verbose"));
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, normalize::cli::NORMALIZE_CMD);
        assert_eq!(sub.get_one::<i64>("baseline-copies"), Some(&2));
    }
}
