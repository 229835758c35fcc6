use std::sync::LazyLock;

use regex::Regex;

use super::Expression;

static BY_GENE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<gene>[A-Z0-9][A-Z0-9\-.]*)\s+amplification$")
        .expect("hard-coded pattern must compile")
});

static BY_COORDINATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<sequence>[^\s:]+(?::[^\s:]+)?):(?:g\.)?(?P<start>\d+)[-_](?P<end>\d+)\s+amplification$",
    )
    .expect("hard-coded pattern must compile")
});

/// `<GENE> amplification`
pub(super) fn parse_by_gene(input: &str) -> Option<Expression> {
    let caps = BY_GENE.captures(input)?;
    Some(Expression::AmplificationByGene {
        gene: caps.name("gene")?.as_str().to_string(),
    })
}

/// `<sequence>:[g.]<start>-<end> amplification`, positions 1-based.
pub(super) fn parse_by_coordinates(input: &str) -> Option<Expression> {
    let caps = BY_COORDINATES.captures(input)?;
    Some(Expression::AmplificationByCoordinates {
        sequence: caps.name("sequence")?.as_str().to_string(),
        start: caps.name("start")?.as_str().parse().ok()?,
        end: caps.name("end")?.as_str().parse().ok()?,
    })
}
