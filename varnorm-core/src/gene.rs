//! Gene symbol lookup table.
//!
//! `GeneTable` is built once at start-up (usually from a TSV export of a gene
//! normalizer) and then only read. It backs the `GeneAuthority` interface.
//!
//! TSV columns, one row per candidate location:
//!
//! ```text
//! symbol  aliases  refget_accession  start  end  priority
//! BRAF    BRAF1|B-RAF1  SQ.F-LrLMe1SRpfUZHkQmvkVKFEGaoDeHul  140719326  140924929  true
//! IFNR    -        .    .    .    .
//! ```
//!
//! A `.` accession marks a gene that is known but has no location. Coordinates are
//! inter-residue.

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use fxhash::FxHashMap;
use log::info;
use varnorm_refget::utils::get_dynamic_reader;
use varnorm_vrs::{SequenceLocation, SequenceReference};

use crate::authority::{GeneAuthority, GeneLocation, GeneMatch};
use crate::errors::AuthorityError;

const DEFAULT_GENE_AUTHORITY_NAME: &str = "gene-normalizer";

/// Immutable gene symbol → locations table.
#[derive(Debug, Clone)]
pub struct GeneTable {
    name: String,
    genes: Vec<GeneMatch>,
    /// uppercased symbol or alias -> index into `genes`
    index: FxHashMap<String, usize>,
}

impl Default for GeneTable {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneTable {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_GENE_AUTHORITY_NAME.to_string(),
            genes: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Load a gene table from a TSV file (plain or gzipped).
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path)?;
        let table = Self::from_reader(reader)
            .with_context(|| format!("Failed to parse gene table {:?}", path))?;
        info!("Loaded {} genes from {:?}", table.len(), path);
        Ok(table)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            if fields.len() != 6 {
                return Err(anyhow!(
                    "line {}: expected 6 tab-separated columns, found {}",
                    idx + 1,
                    fields.len()
                ));
            }
            let aliases: Vec<&str> = match fields[1] {
                "-" | "." | "" => Vec::new(),
                list => list.split('|').map(str::trim).collect(),
            };
            let location = parse_location(&fields[2..])
                .with_context(|| format!("line {}", idx + 1))?;
            table.insert(fields[0], &aliases, location);
        }
        Ok(table)
    }

    /// Add a gene row. Rows sharing a symbol accumulate locations.
    pub fn insert(&mut self, symbol: &str, aliases: &[&str], location: Option<GeneLocation>) {
        let key = symbol.to_ascii_uppercase();
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                self.genes.push(GeneMatch {
                    symbol: symbol.to_string(),
                    locations: Vec::new(),
                });
                let idx = self.genes.len() - 1;
                self.index.insert(key, idx);
                idx
            }
        };
        for alias in aliases {
            // approved symbols win over aliases
            self.index.entry(alias.to_ascii_uppercase()).or_insert(idx);
        }
        if let Some(location) = location {
            self.genes[idx].locations.push(location);
        }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

fn parse_location(fields: &[&str]) -> Result<Option<GeneLocation>> {
    if fields[0] == "." || fields[0].is_empty() {
        return Ok(None);
    }
    let start: u64 = fields[1]
        .parse()
        .with_context(|| format!("invalid start: {}", fields[1]))?;
    let end: u64 = fields[2]
        .parse()
        .with_context(|| format!("invalid end: {}", fields[2]))?;
    if start > end {
        return Err(anyhow!("start {} is past end {}", start, end));
    }
    let is_priority = matches!(
        fields[3].to_ascii_lowercase().as_str(),
        "true" | "yes" | "1"
    );
    Ok(Some(GeneLocation {
        location: SequenceLocation::new(SequenceReference::new(fields[0]), start, end),
        is_priority,
    }))
}

impl GeneAuthority for GeneTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, symbol: &str) -> Result<Option<GeneMatch>, AuthorityError> {
        Ok(self
            .index
            .get(&symbol.trim().to_ascii_uppercase())
            .map(|&idx| self.genes[idx].clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    const TABLE: &str = "#symbol\taliases\trefget_accession\tstart\tend\tpriority
BRAF\tBRAF1|B-RAF1\tSQ.F-LrLMe1SRpfUZHkQmvkVKFEGaoDeHul\t140719326\t140924929\ttrue
BRAF\tBRAF1\tSQ.IW78mgV5Cqf6M24hy52hPjyyo5tCCd86\t140434396\t140624503\tfalse
IFNR\t-\t.\t.\t.\t.
";

    #[fixture]
    fn table() -> GeneTable {
        GeneTable::from_reader(TABLE.as_bytes()).unwrap()
    }

    #[rstest]
    #[case("BRAF")]
    #[case("braf")]
    #[case("B-RAF1")]
    fn looks_up_symbols_and_aliases(table: GeneTable, #[case] query: &str) {
        let gene = table.lookup(query).unwrap().unwrap();
        assert_eq!(gene.symbol, "BRAF");
        assert_eq!(gene.locations.len(), 2);
        assert_eq!(
            gene.priority_location().map(|l| l.start),
            Some(140719326)
        );
    }

    #[rstest]
    fn known_gene_without_location(table: GeneTable) {
        let gene = table.lookup("ifnr").unwrap().unwrap();
        assert_eq!(gene.symbol, "IFNR");
        assert!(gene.locations.is_empty());
        assert!(table.locations_for_symbol("IFNR").unwrap().is_empty());
    }

    #[rstest]
    fn unknown_gene(table: GeneTable) {
        assert_eq!(table.lookup("NOTAGENE").unwrap(), None);
        assert!(table.locations_for_symbol("NOTAGENE").unwrap().is_empty());
        assert_eq!(table.len(), 2);
        assert_eq!(table.name(), "gene-normalizer");
    }

    #[test]
    fn rejects_short_rows() {
        let err = GeneTable::from_reader("BRAF\tSQ.x\t1\t2\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("expected 6"));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genes.tsv");
        std::fs::write(&path, TABLE).unwrap();
        let table = GeneTable::from_tsv(&path).unwrap().with_name("genes");
        assert_eq!(table.name(), "genes");
        assert!(table.lookup("BRAF1").unwrap().is_some());
    }
}
