use polars::prelude::*;

/// A single FASTA entry.
///
/// `id` is the first whitespace-delimited token of the header and
/// `description` is the whole header line without the leading '>'.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub description: String,
    pub seq: String,
}

impl SequenceRecord {
    /// Builds a record whose description is just its identifier
    pub fn new(id: impl Into<String>, seq: impl Into<String>) -> Self {
        let id = id.into();
        SequenceRecord {
            description: id.clone(),
            id,
            seq: seq.into(),
        }
    }

    /// Builds a record from a raw header line (without '>')
    pub fn from_header(header: &str, seq: impl Into<String>) -> Self {
        let description = header.trim_end().to_string();
        let id = description
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        SequenceRecord {
            id,
            description,
            seq: seq.into(),
        }
    }
}

/// Outcome of classifying one record against both motif families
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub record: SequenceRecord,
    /// At least one literal (zic2) motif occurs in the sequence
    pub literal_match: bool,
    /// At least one expanded degenerate (ctcf) variant occurs in the sequence
    pub degenerate_match: bool,
}

impl ClassificationResult {
    pub fn both(&self) -> bool {
        self.literal_match && self.degenerate_match
    }

    pub fn neither(&self) -> bool {
        !self.literal_match && !self.degenerate_match
    }
}

/// Per-record classification table
/// Stored as a DataFrame with columns id, zic2_match, ctcf_match
pub type ClassificationTable = DataFrame;
