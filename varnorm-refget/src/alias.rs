//! Alias management for human-readable sequence names.
//!
//! Each alias lives in a namespace (e.g. "refseq", "GRCh38") and maps to the
//! `sha512t24u` digest of a sequence held by the `SequenceStore`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::StoreError;

/// namespace → { alias → digest }
type AliasStore = HashMap<String, HashMap<String, String>>;

/// Manages namespaced, human-readable aliases for sequences.
#[derive(Debug, Default, Clone)]
pub struct AliasManager {
    aliases: AliasStore,
}

impl AliasManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `alias` in `namespace`, replacing any earlier target.
    pub fn add(&mut self, namespace: &str, alias: &str, digest: &str) {
        self.aliases
            .entry(namespace.to_string())
            .or_default()
            .insert(alias.to_string(), digest.to_string());
    }

    /// Forward lookup within a single namespace.
    pub fn resolve(&self, namespace: &str, alias: &str) -> Option<&str> {
        self.aliases
            .get(namespace)
            .and_then(|ns| ns.get(alias))
            .map(String::as_str)
    }

    /// Look an alias up in every namespace, in sorted namespace order, and return the
    /// first hit.
    pub fn resolve_any(&self, alias: &str) -> Option<&str> {
        self.namespaces()
            .into_iter()
            .find_map(|namespace| self.resolve(namespace, alias))
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.aliases.contains_key(namespace)
    }

    /// All namespaces, sorted.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut namespaces: Vec<&str> = self.aliases.keys().map(String::as_str).collect();
        namespaces.sort_unstable();
        namespaces
    }

    /// Number of aliases across all namespaces.
    pub fn len(&self) -> usize {
        self.aliases.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load aliases from a TSV file into a namespace.
    /// Format: alias\tdigest per line. Lines starting with '#' are comments.
    ///
    /// Returns the number of aliases added. Digests are taken as-is; an `SQ.` prefix is
    /// stripped so both `SQ.<digest>` and bare digests are accepted.
    pub fn load_tsv(&mut self, namespace: &str, path: &Path) -> Result<usize, StoreError> {
        let reader = BufReader::new(File::open(path)?);
        let mut count = 0;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            let Some((alias, digest)) = line.split_once('\t') else {
                return Err(StoreError::AliasFormat {
                    line: idx + 1,
                    content: line,
                });
            };
            let digest = digest.trim();
            let digest = digest.strip_prefix("SQ.").unwrap_or(digest);
            self.add(namespace, alias.trim(), digest);
            count += 1;
        }
        Ok(count)
    }
}
