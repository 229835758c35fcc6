use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use log::info;

use crate::alias::AliasManager;
use crate::errors::StoreError;
use crate::fasta::load_fasta_file;
use crate::types::SequenceRecord;

const DEFAULT_STORE_NAME: &str = "refget";

/// In-memory store of digested reference sequences.
///
/// Sequences are keyed by their `sha512t24u` digest. An MD5 lookup table and a set of
/// namespaced aliases sit on top, so the same sequence can be reached as
/// `ga4gh:SQ.<digest>`, `MD5:<md5>`, `refseq:NC_000007.14` or plain `NC_000007.14`.
///
/// The store is built once and then only read, so it can be shared by reference
/// across threads.
#[derive(Debug, Clone)]
pub struct SequenceStore {
    /// Human-readable name of this store, reported in diagnostics
    name: String,
    /// SHA512t24u digest -> SequenceRecord
    sequences: HashMap<String, SequenceRecord>,
    /// MD5 digest -> SHA512t24u digest
    md5_lookup: HashMap<String, String>,
    aliases: AliasManager,
}

impl Default for SequenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceStore {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_STORE_NAME.to_string(),
            sequences: HashMap::new(),
            md5_lookup: HashMap::new(),
            aliases: AliasManager::new(),
        }
    }

    /// Set the name used when this store is reported in diagnostics.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build a store from a FASTA file, registering every record name under `namespace`.
    pub fn from_fasta<P: AsRef<Path>>(path: P, namespace: &str) -> Result<Self> {
        let mut store = Self::new();
        store.add_fasta(path, namespace)?;
        Ok(store)
    }

    /// Add every record of a FASTA file, registering its name under `namespace`.
    ///
    /// Returns the number of sequences added.
    pub fn add_fasta<P: AsRef<Path>>(&mut self, path: P, namespace: &str) -> Result<usize> {
        let path = path.as_ref();
        let records = load_fasta_file(path)?;
        let count = records.len();
        for record in records {
            self.add_sequence(record, Some(namespace));
        }
        info!("Loaded {} sequences from {:?} into {}", count, path, self.name);
        Ok(count)
    }

    /// Add a digested sequence. When `namespace` is given, the record name becomes an
    /// alias in that namespace.
    ///
    /// Returns the `sha512t24u` digest of the sequence.
    pub fn add_sequence(&mut self, record: SequenceRecord, namespace: Option<&str>) -> String {
        let digest = record.metadata.sha512t24u.clone();
        if let Some(namespace) = namespace {
            self.aliases.add(namespace, &record.metadata.name, &digest);
        }
        self.md5_lookup
            .insert(record.metadata.md5.clone(), digest.clone());
        self.sequences.insert(digest.clone(), record);
        digest
    }

    /// Register an alias for a sequence already in the store.
    pub fn add_alias(&mut self, namespace: &str, alias: &str, digest: &str) -> Result<(), StoreError> {
        let digest = digest.strip_prefix("SQ.").unwrap_or(digest);
        if !self.sequences.contains_key(digest) {
            return Err(StoreError::UnknownDigest(digest.to_string()));
        }
        self.aliases.add(namespace, alias, digest);
        Ok(())
    }

    /// Load an `alias\tdigest` TSV into `namespace`.
    ///
    /// Aliases pointing at digests the store does not hold are kept; they simply never
    /// resolve.
    pub fn load_alias_tsv<P: AsRef<Path>>(&mut self, namespace: &str, path: P) -> Result<usize> {
        let path = path.as_ref();
        let count = self.aliases.load_tsv(namespace, path)?;
        info!("Loaded {} {} aliases from {:?}", count, namespace, path);
        Ok(count)
    }

    pub fn aliases(&self) -> &AliasManager {
        &self.aliases
    }

    /// Number of sequences in the store.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Retrieve a record by its `sha512t24u` digest (with or without the `SQ.` prefix).
    pub fn get(&self, digest: &str) -> Option<&SequenceRecord> {
        let digest = digest.strip_prefix("SQ.").unwrap_or(digest);
        self.sequences.get(digest)
    }

    /// Resolve any supported identifier form to a record.
    ///
    /// Accepted forms:
    /// - `ga4gh:SQ.<digest>` or `SQ.<digest>`
    /// - `MD5:<md5>` (case-insensitive prefix)
    /// - `<namespace>:<alias>` for a known namespace
    /// - a bare alias, searched in every namespace
    pub fn resolve(&self, query: &str) -> Option<&SequenceRecord> {
        let query = query.trim();
        let stripped = query.strip_prefix("ga4gh:").unwrap_or(query);
        if let Some(digest) = stripped.strip_prefix("SQ.") {
            return self.sequences.get(digest);
        }

        if let Some((namespace, alias)) = query.split_once(':') {
            if namespace.eq_ignore_ascii_case("md5") {
                return self
                    .md5_lookup
                    .get(&alias.to_ascii_lowercase())
                    .and_then(|digest| self.sequences.get(digest));
            }
            if self.aliases.has_namespace(namespace) {
                return self
                    .aliases
                    .resolve(namespace, alias)
                    .and_then(|digest| self.sequences.get(digest));
            }
        }

        self.aliases
            .resolve_any(query)
            .and_then(|digest| self.sequences.get(digest))
    }

    /// Retrieve residues `[start, end)` of a sequence by digest.
    pub fn substring(&self, digest: &str, start: usize, end: usize) -> Result<String, StoreError> {
        let record = self
            .get(digest)
            .ok_or_else(|| StoreError::UnknownDigest(digest.to_string()))?;
        if start > end || end > record.len() {
            return Err(StoreError::RangeOutOfBounds {
                digest: digest.to_string(),
                start,
                end,
                length: record.len(),
            });
        }
        Ok(String::from_utf8_lossy(&record.sequence[start..end]).into_owned())
    }
}
