//! Arguments and loading shared by every subcommand.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::info;
use serde::Serialize;

use varnorm_core::{GeneTable, NormalizerConfig};
use varnorm_refget::SequenceStore;

pub const DEFAULT_NAMESPACE: &str = "refseq";

/// Add the authority and configuration arguments to a subcommand.
pub fn with_authority_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("fasta")
                .long("fasta")
                .required(true)
                .help("Reference sequences (FASTA, optionally gzipped)"),
        )
        .arg(
            Arg::new("namespace")
                .long("namespace")
                .default_value(DEFAULT_NAMESPACE)
                .help("Namespace the FASTA record names are registered under"),
        )
        .arg(
            Arg::new("aliases")
                .long("aliases")
                .action(ArgAction::Append)
                .help("Alias table as <namespace>=<tsv>, e.g. GRCh38=grch38.tsv"),
        )
        .arg(
            Arg::new("genes")
                .long("genes")
                .help("Gene location table (TSV)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Normalizer configuration (TOML)"),
        )
}

/// Everything a `Normalizer` borrows, loaded from the command line.
pub struct Authorities {
    pub store: SequenceStore,
    pub genes: GeneTable,
    pub config: NormalizerConfig,
}

fn parse_alias_arg(value: &str) -> Result<(&str, &str)> {
    value
        .split_once('=')
        .filter(|(namespace, path)| !namespace.is_empty() && !path.is_empty())
        .ok_or_else(|| anyhow!("--aliases expects <namespace>=<tsv>, got {}", value))
}

pub fn load_authorities(matches: &ArgMatches) -> Result<Authorities> {
    let fasta = matches
        .get_one::<String>("fasta")
        .ok_or_else(|| anyhow!("A path to a FASTA file is required."))?;
    let default_namespace = DEFAULT_NAMESPACE.to_string();
    let namespace = matches
        .get_one::<String>("namespace")
        .unwrap_or(&default_namespace);

    let mut store = SequenceStore::from_fasta(Path::new(fasta), namespace)?;
    if let Some(aliases) = matches.get_many::<String>("aliases") {
        for value in aliases {
            let (alias_namespace, path) = parse_alias_arg(value)?;
            store.load_alias_tsv(alias_namespace, Path::new(path))?;
        }
    }

    let genes = match matches.get_one::<String>("genes") {
        Some(path) => GeneTable::from_tsv(Path::new(path))?,
        None => GeneTable::new(),
    };

    let config = match matches.get_one::<String>("config") {
        Some(path) => NormalizerConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to read config {}", path))?,
        None => NormalizerConfig::default(),
    };
    info!(
        "Ready with {} sequences and {} genes",
        store.len(),
        genes.len()
    );

    Ok(Authorities {
        store,
        genes,
        config,
    })
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
