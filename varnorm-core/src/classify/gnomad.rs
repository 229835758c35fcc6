use std::sync::LazyLock;

use regex::Regex;

static GNOMAD_VCF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:chromosome|chr)?(?P<chrom>[1-9]|1[0-9]|2[0-2]|X|Y)-(?P<pos>\d+)-(?P<ref>[ACGTN]+)-(?P<alt>[ACGTN]+)$",
    )
    .expect("hard-coded pattern must compile")
});

/// A gnomAD-style `chrom-pos-ref-alt` variant. Chromosome and bases are uppercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfToken {
    pub chromosome: String,
    /// 1-based position of the first reference base.
    pub position: u64,
    pub reference: String,
    pub alternate: String,
}

pub(super) fn parse_gnomad_vcf(input: &str) -> Option<VcfToken> {
    let caps = GNOMAD_VCF.captures(input)?;
    Some(VcfToken {
        chromosome: caps.name("chrom")?.as_str().to_ascii_uppercase(),
        position: caps.name("pos")?.as_str().parse().ok()?,
        reference: caps.name("ref")?.as_str().to_ascii_uppercase(),
        alternate: caps.name("alt")?.as_str().to_ascii_uppercase(),
    })
}
