use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{DupDel, Expression, GenomicChange};
use crate::ambiguity::{AmbiguousRange, Boundary};

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($re).expect("hard-coded pattern must compile"));
    };
}

pattern!(ACCESSION, r"^(?P<accession>[^\s:]+):g\.(?P<change>\S+)$");
pattern!(FREE_TEXT, r"^(?P<gene>[A-Za-z0-9][A-Za-z0-9\-.]*)\s+g\.(?P<change>\S+)$");

pattern!(SUBSTITUTION, r"^(?P<pos>\d+)(?P<ref>[ACGTN])>(?P<alt>[ACGTN])$");
pattern!(DELINS, r"^(?P<start>\d+)(?:_(?P<end>\d+))?delins(?P<seq>[ACGTN]+)$");
pattern!(DELETION, r"^(?P<start>\d+)(?:_(?P<end>\d+))?del(?P<seq>[ACGTN]+)?$");
pattern!(INSERTION, r"^(?P<start>\d+)_(?P<end>\d+)ins(?P<seq>[ACGTN]+)$");
pattern!(DUPLICATION, r"^(?P<start>\d+)(?:_(?P<end>\d+))?dup$");
pattern!(REFERENCE_AGREE, r"^(?P<start>\d+)(?:_(?P<end>\d+))?=$");
pattern!(
    AMBIGUOUS,
    r"^(?P<start>\((?:\?|\d+)_(?:\?|\d+)\)|\d+)_(?P<end>\((?:\?|\d+)_(?:\?|\d+)\)|\d+)(?P<kind>del|dup)$"
);

fn number(caps: &Captures, name: &str) -> Option<u64> {
    caps.name(name)?.as_str().parse().ok()
}

/// `start[_end]`, with `end` defaulting to `start`.
fn span(caps: &Captures) -> Option<(u64, u64)> {
    let start = number(caps, "start")?;
    let end = match caps.name("end") {
        Some(end) => end.as_str().parse().ok()?,
        None => start,
    };
    Some((start, end))
}

fn text(caps: &Captures, name: &str) -> Option<String> {
    caps.name(name).map(|m| m.as_str().to_string())
}

/// Parse the part of a genomic HGVS expression after `g.`.
pub fn parse_change(change: &str) -> Option<GenomicChange> {
    if let Some(caps) = SUBSTITUTION.captures(change) {
        return Some(GenomicChange::Substitution {
            position: number(&caps, "pos")?,
            reference: text(&caps, "ref")?,
            alternate: text(&caps, "alt")?,
        });
    }
    // delins must be tried before del
    if let Some(caps) = DELINS.captures(change) {
        let (start, end) = span(&caps)?;
        return Some(GenomicChange::DeletionInsertion {
            start,
            end,
            inserted: text(&caps, "seq")?,
        });
    }
    if let Some(caps) = DELETION.captures(change) {
        let (start, end) = span(&caps)?;
        return Some(GenomicChange::Deletion {
            start,
            end,
            deleted: text(&caps, "seq"),
        });
    }
    if let Some(caps) = INSERTION.captures(change) {
        let (start, end) = span(&caps)?;
        return Some(GenomicChange::Insertion {
            start,
            end,
            inserted: text(&caps, "seq")?,
        });
    }
    if let Some(caps) = DUPLICATION.captures(change) {
        let (start, end) = span(&caps)?;
        return Some(GenomicChange::Duplication { start, end });
    }
    if let Some(caps) = REFERENCE_AGREE.captures(change) {
        let (start, end) = span(&caps)?;
        return Some(GenomicChange::ReferenceAgree { start, end });
    }
    if let Some(caps) = AMBIGUOUS.captures(change) {
        let start = caps.name("start")?.as_str();
        let end = caps.name("end")?.as_str();
        // two exact positions are an exact dup/del, handled above
        if !start.starts_with('(') && !end.starts_with('(') {
            return None;
        }
        let kind = match caps.name("kind")?.as_str() {
            "del" => DupDel::Deletion,
            _ => DupDel::Duplication,
        };
        return Some(GenomicChange::Ambiguous {
            kind,
            range: AmbiguousRange {
                start: Boundary::parse(start)?,
                end: Boundary::parse(end)?,
            },
        });
    }
    None
}

/// `<accession>:g.<change>`
pub(super) fn parse_hgvs(input: &str) -> Option<Expression> {
    let caps = ACCESSION.captures(input)?;
    Some(Expression::Hgvs {
        accession: text(&caps, "accession")?,
        change: parse_change(caps.name("change")?.as_str())?,
    })
}

/// `<GENE> g.<change>`
pub(super) fn parse_free_text(input: &str) -> Option<Expression> {
    let caps = FREE_TEXT.captures(input)?;
    Some(Expression::FreeTextGenomic {
        gene: text(&caps, "gene")?,
        change: parse_change(caps.name("change")?.as_str())?,
    })
}
