use std::fs;
use std::path::Path;
use std::process::Command;

use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

const FASTA: &str = ">NC_000007.14 synthetic chromosome 7
GGGGCACACACATTTTGCATGCAAA
";

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ref.fa"), FASTA).unwrap();
    fs::write(dir.path().join("grch38.tsv"), "7\tSQ.unused\n").unwrap();
    dir
}

fn varnorm(dir: &Path, args: &[&str]) -> (bool, Value) {
    let fasta = dir.join("ref.fa");
    let output = Command::new(env!("CARGO_BIN_EXE_varnorm"))
        .args(args)
        .arg("--fasta")
        .arg(&fasta)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json = serde_json::from_str(&stdout).unwrap_or(Value::Null);
    (output.status.success(), json)
}

#[test]
fn to_vrs_prints_an_allele() {
    let dir = workspace();
    let (ok, json) = varnorm(dir.path(), &["to-vrs", "NC_000007.14:g.2G>T"]);
    assert!(ok);
    assert_eq!(json["variation"]["type"], "Allele");
    assert_eq!(json["variation"]["location"]["start"], 1);
    assert_eq!(json["warnings"], Value::Array(vec![]));
}

#[test]
fn normalize_with_mode() {
    let dir = workspace();
    let (ok, json) = varnorm(
        dir.path(),
        &[
            "normalize",
            "NC_000007.14:g.7_8del",
            "--mode",
            "copy_number_change",
            "--copy-change",
            "low-level loss",
        ],
    );
    assert!(ok);
    assert_eq!(json["variation"]["type"], "CopyNumberChange");
    assert_eq!(json["variation"]["copyChange"]["primaryCode"], "EFO:0030068");
}

#[test]
fn hgvs_to_copy_number_count() {
    let dir = workspace();
    let (ok, json) = varnorm(
        dir.path(),
        &["hgvs-to-cn-count", "NC_000007.14:g.13_16dup", "--baseline-copies", "2"],
    );
    assert!(ok);
    assert_eq!(json["variation"]["copies"], 3);
}

#[test]
fn negative_baseline_fails() {
    let dir = workspace();
    let (ok, _) = varnorm(
        dir.path(),
        &["hgvs-to-cn-count", "NC_000007.14:g.13_16dup", "--baseline-copies", "-1"],
    );
    assert!(!ok);
}

#[test]
fn amplification_of_unknown_gene() {
    let dir = workspace();
    let (ok, json) = varnorm(dir.path(), &["amplification", "BRAF"]);
    assert!(ok);
    assert_eq!(
        json["warnings"][0],
        "gene-normalizer returned no match for gene: BRAF"
    );
}

#[test]
fn aliases_are_loaded() {
    let dir = workspace();
    let aliases = format!("GRCh38={}", dir.path().join("grch38.tsv").display());
    let (ok, json) = varnorm(
        dir.path(),
        &["hgvs-to-cn-change", "NC_000007.14:g.7_8del", "--aliases", &aliases],
    );
    assert!(ok);
    assert_eq!(json["variation"]["copyChange"]["primaryCode"], "EFO:0030067");
}
