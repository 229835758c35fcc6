//! Integration tests for loading a FASTA file plus alias tables into a SequenceStore
//! and resolving sequences through every supported identifier form.

use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;
use varnorm_refget::{SequenceStore, md5, sha512t24u};

/// Helper function to create a temporary FASTA file with test sequences
fn create_test_fasta() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, ">NC_000001.11 Homo sapiens chromosome 1").expect("Failed to write");
    writeln!(file, "acgtacgtac").expect("Failed to write");
    writeln!(file, "GTACGTACGT").expect("Failed to write");
    writeln!(file, ">NC_000002.12").expect("Failed to write");
    writeln!(file, "TTTTGGGGCC").expect("Failed to write");
    file
}

fn create_alias_tsv(rows: &[(&str, &str)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "# alias\tdigest").expect("Failed to write");
    for (alias, digest) in rows {
        writeln!(file, "{}\t{}", alias, digest).expect("Failed to write");
    }
    file
}

#[test]
fn test_fasta_and_alias_workflow() {
    let fasta = create_test_fasta();
    let mut store = SequenceStore::from_fasta(fasta.path(), "refseq").expect("Failed to load FASTA");
    assert_eq!(store.len(), 2);

    let chr1 = sha512t24u("ACGTACGTACGTACGTACGT");
    let chr2 = sha512t24u("TTTTGGGGCC");
    let prefixed = format!("SQ.{}", chr1);
    let aliases = create_alias_tsv(&[
        ("1", prefixed.as_str()),
        ("chr1", chr1.as_str()),
        ("2", chr2.as_str()),
    ]);
    let count = store
        .load_alias_tsv("GRCh38", aliases.path())
        .expect("Failed to load aliases");
    assert_eq!(count, 3);

    for query in ["refseq:NC_000001.11", "NC_000001.11", "GRCh38:1", "GRCh38:chr1"] {
        let record = store.resolve(query).expect(query);
        assert_eq!(record.metadata.sha512t24u, chr1);
        assert_eq!(record.metadata.length, 20);
        assert_eq!(
            record.metadata.description.as_deref(),
            Some("Homo sapiens chromosome 1")
        );
    }

    let by_md5 = store
        .resolve(&format!("MD5:{}", md5("TTTTGGGGCC")))
        .expect("md5 lookup");
    assert_eq!(by_md5.metadata.name, "NC_000002.12");
    assert_eq!(store.substring(&chr2, 4, 8).unwrap(), "GGGG");
    assert!(store.resolve("GRCh38:3").is_none());
}

#[test]
fn test_store_name_is_configurable() {
    let fasta = create_test_fasta();
    let store = SequenceStore::from_fasta(fasta.path(), "refseq")
        .expect("Failed to load FASTA")
        .with_name("SeqRepo");
    assert_eq!(store.name(), "SeqRepo");
}
