//! Interfaces to the two external collaborators: the reference sequence authority and
//! the gene authority.
//!
//! Both are long-lived and read-only, and are shared by reference across concurrent
//! requests. Implementations decide how lookups are performed (in memory, on disk,
//! over the network); the engine adds no locking, retries or timeouts of its own.

use varnorm_refget::{SequenceStore, StoreError};
use varnorm_vrs::{SequenceLocation, SequenceReference};

use crate::errors::AuthorityError;

/// Resolves accession-like strings to reference sequences and serves their residues.
pub trait SequenceAuthority: Send + Sync {
    /// Name used when this authority is mentioned in warnings.
    fn name(&self) -> &str;

    fn resolve_accession(&self, alias: &str) -> Result<SequenceReference, AuthorityError>;

    fn sequence_length(&self, reference: &SequenceReference) -> Result<u64, AuthorityError>;

    /// Residues `[start, end)` of the sequence.
    fn subsequence(
        &self,
        reference: &SequenceReference,
        start: u64,
        end: u64,
    ) -> Result<String, AuthorityError>;
}

/// A candidate location for a gene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneLocation {
    pub location: SequenceLocation,
    pub is_priority: bool,
}

/// A gene known to the authority, with its approved symbol and candidate locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneMatch {
    pub symbol: String,
    pub locations: Vec<GeneLocation>,
}

impl GeneMatch {
    /// The location the authority designates as representative, if any.
    pub fn priority_location(&self) -> Option<&SequenceLocation> {
        self.locations
            .iter()
            .find(|l| l.is_priority)
            .map(|l| &l.location)
    }

    /// All locations, priority ones first, otherwise in authority order.
    pub fn locations_by_priority(&self) -> Vec<&SequenceLocation> {
        let (priority, rest): (Vec<&GeneLocation>, Vec<&GeneLocation>) =
            self.locations.iter().partition(|l| l.is_priority);
        priority
            .into_iter()
            .chain(rest)
            .map(|l| &l.location)
            .collect()
    }
}

/// Resolves gene symbols to candidate genomic locations.
pub trait GeneAuthority: Send + Sync {
    /// Name used when this authority is mentioned in warnings.
    fn name(&self) -> &str;

    /// Look a symbol (or alias) up. `Ok(None)` means the symbol is unknown.
    fn lookup(&self, symbol: &str) -> Result<Option<GeneMatch>, AuthorityError>;

    /// Candidate locations for a symbol; empty if the symbol is unknown.
    fn locations_for_symbol(&self, symbol: &str) -> Result<Vec<GeneLocation>, AuthorityError> {
        Ok(self
            .lookup(symbol)?
            .map(|gene| gene.locations)
            .unwrap_or_default())
    }
}

fn store_error(err: StoreError) -> AuthorityError {
    match err {
        StoreError::Io(e) => AuthorityError::Unavailable(e.to_string()),
        other => AuthorityError::NotFound(other.to_string()),
    }
}

fn to_usize(value: u64) -> Result<usize, AuthorityError> {
    usize::try_from(value).map_err(|_| AuthorityError::NotFound(format!("position {} is too large", value)))
}

impl SequenceAuthority for SequenceStore {
    fn name(&self) -> &str {
        SequenceStore::name(self)
    }

    fn resolve_accession(&self, alias: &str) -> Result<SequenceReference, AuthorityError> {
        self.resolve(alias)
            .map(|record| SequenceReference::new(&record.metadata.refget_accession()))
            .ok_or_else(|| AuthorityError::NotFound(alias.to_string()))
    }

    fn sequence_length(&self, reference: &SequenceReference) -> Result<u64, AuthorityError> {
        self.get(&reference.refget_accession)
            .map(|record| record.len() as u64)
            .ok_or_else(|| AuthorityError::NotFound(reference.refget_accession.clone()))
    }

    fn subsequence(
        &self,
        reference: &SequenceReference,
        start: u64,
        end: u64,
    ) -> Result<String, AuthorityError> {
        self.substring(&reference.refget_accession, to_usize(start)?, to_usize(end)?)
            .map_err(store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use varnorm_refget::digest_sequence;

    fn location(start: u64, end: u64) -> SequenceLocation {
        SequenceLocation::new(SequenceReference::new("SQ.test"), start, end)
    }

    #[test]
    fn store_backed_authority() {
        let mut store = SequenceStore::new().with_name("SeqRepo");
        store.add_sequence(digest_sequence("NC_000001.11", b"ACGTACGT"), Some("refseq"));

        let reference = store.resolve_accession("NC_000001.11").unwrap();
        assert!(reference.refget_accession.starts_with("SQ."));
        assert_eq!(store.sequence_length(&reference), Ok(8));
        assert_eq!(store.subsequence(&reference, 2, 4), Ok("GT".to_string()));
        assert_eq!(SequenceAuthority::name(&store), "SeqRepo");
        assert_eq!(
            store.resolve_accession("NC_000002.12"),
            Err(AuthorityError::NotFound("NC_000002.12".to_string()))
        );
        assert!(matches!(
            store.subsequence(&reference, 4, 9),
            Err(AuthorityError::NotFound(_))
        ));
    }

    #[test]
    fn priority_locations_come_first() {
        let gene = GeneMatch {
            symbol: "BRAF".to_string(),
            locations: vec![
                GeneLocation { location: location(1, 2), is_priority: false },
                GeneLocation { location: location(5, 9), is_priority: true },
            ],
        };
        assert_eq!(gene.priority_location(), Some(&location(5, 9)));
        assert_eq!(gene.locations_by_priority(), vec![&location(5, 9), &location(1, 2)]);
    }
}
