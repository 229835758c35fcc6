//! Sequence records held by the store.

use serde::{Deserialize, Serialize};

use crate::digest::{md5, sha512t24u};

/// Metadata for a single sequence, including its name, length and digests.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceMetadata {
    pub name: String,
    /// Description from FASTA header (text after first whitespace).
    #[serde(default)]
    pub description: Option<String>,
    pub length: usize,
    pub sha512t24u: String,
    pub md5: String,
}

impl SequenceMetadata {
    /// The refget accession for this sequence, e.g. `SQ.F-LrLMe1SRpfUZHkQmvkVKFEGaoDeHul`.
    pub fn refget_accession(&self) -> String {
        format!("SQ.{}", self.sha512t24u)
    }
}

/// A digested sequence together with its (uppercased) residues.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceRecord {
    pub metadata: SequenceMetadata,
    pub sequence: Vec<u8>,
}

impl SequenceRecord {
    pub fn metadata(&self) -> &SequenceMetadata {
        &self.metadata
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Digest a raw sequence and wrap it into a `SequenceRecord`.
///
/// The data is uppercased before hashing, matching FASTA processing.
///
/// # Example
/// ```
/// use varnorm_refget::digest_sequence;
///
/// let seq = digest_sequence("chr1", b"acgt");
/// assert_eq!(seq.metadata().name, "chr1");
/// assert_eq!(seq.metadata().length, 4);
/// assert_eq!(seq.metadata().sha512t24u, "aKF498dAxcJAqme6QYQ7EZ07-fiw8Kw2");
/// ```
pub fn digest_sequence(name: &str, data: &[u8]) -> SequenceRecord {
    let uppercased: Vec<u8> = data.iter().map(|b| b.to_ascii_uppercase()).collect();

    let metadata = SequenceMetadata {
        name: name.to_string(),
        description: None,
        length: uppercased.len(),
        sha512t24u: sha512t24u(&uppercased),
        md5: md5(&uppercased),
    };
    SequenceRecord {
        metadata,
        sequence: uppercased,
    }
}
