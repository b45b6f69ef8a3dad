use crate::error::{MotifError, Result};
use crate::output::StagedFile;
use crate::types::{ClassificationResult, ClassificationTable, SequenceRecord};
use polars::prelude::*;
use std::fmt;
use std::path::Path;

pub const ID_COLUMN: &str = "id";
pub const LITERAL_COLUMN: &str = "zic2_match";
pub const DEGENERATE_COLUMN: &str = "ctcf_match";

/// Builds the per-record classification table.
///
/// # Arguments
/// * `results` - Classification results, in any order
///
/// # Returns
/// * `Result<ClassificationTable>` - A DataFrame with one row per result:
///   - "id": The record identifier
///   - "zic2_match": Whether a literal motif was found
///   - "ctcf_match": Whether an expanded degenerate variant was found
///
/// # Errors
/// * Returns `MotifError::DataError` if DataFrame creation fails
pub fn classification_table(results: &[ClassificationResult]) -> Result<ClassificationTable> {
    let ids: Vec<&str> = results.iter().map(|r| r.record.id.as_str()).collect();
    let literal: Vec<bool> = results.iter().map(|r| r.literal_match).collect();
    let degenerate: Vec<bool> = results.iter().map(|r| r.degenerate_match).collect();

    DataFrame::new(vec![
        Column::new(ID_COLUMN.into(), ids),
        Column::new(LITERAL_COLUMN.into(), literal),
        Column::new(DEGENERATE_COLUMN.into(), degenerate),
    ])
    .map_err(|e| MotifError::DataError(e.to_string()))
}

/// Serializes a classification table as CSV into a staged file.
///
/// # Errors
/// * Returns `MotifError::Io` if the staged file cannot be created
/// * Returns `MotifError::DataError` if serialization fails
pub fn stage_table(
    table: &mut ClassificationTable,
    filename: impl AsRef<Path>,
) -> Result<StagedFile> {
    let mut staged = StagedFile::new(filename)?;
    CsvWriter::new(staged.file_mut())
        .include_header(true)
        .finish(table)
        .map_err(|e| MotifError::DataError(e.to_string()))?;
    Ok(staged)
}

/// Writes a classification table as CSV with a header row.
///
/// `filename` only appears once the whole table has been serialized.
///
/// # Errors
/// * Returns `MotifError::Io` if the file cannot be created
/// * Returns `MotifError::DataError` if serialization fails
pub fn write_table(table: &mut ClassificationTable, filename: impl AsRef<Path>) -> Result<()> {
    stage_table(table, filename)?.persist()?;
    Ok(())
}

/// Records matching both motif families, in result order
pub fn select_matches(results: &[ClassificationResult]) -> impl Iterator<Item = &SequenceRecord> {
    results.iter().filter(|r| r.both()).map(|r| &r.record)
}

fn count_where(table: &ClassificationTable, predicate: Expr) -> Result<usize> {
    let filtered = table
        .clone()
        .lazy()
        .filter(predicate)
        .collect()
        .map_err(|e| MotifError::DataError(e.to_string()))?;
    Ok(filtered.height())
}

/// Aggregate counts over a complete result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchSummary {
    pub total: usize,
    pub literal: usize,
    pub degenerate: usize,
    pub both: usize,
    pub neither: usize,
}

impl MatchSummary {
    /// Derives `neither` by inclusion-exclusion:
    /// `neither = total - (literal + degenerate - both)`.
    ///
    /// # Errors
    /// * Returns `MotifError::DataError` if `both` exceeds either family count,
    ///   or if the matching records outnumber `total`
    pub fn new(total: usize, literal: usize, degenerate: usize, both: usize) -> Result<Self> {
        if both > literal.min(degenerate) {
            return Err(MotifError::DataError(format!(
                "{both} records match both families but only {literal} / {degenerate} match each"
            )));
        }
        let either = literal + degenerate - both;
        if either > total {
            return Err(MotifError::DataError(format!(
                "{either} records match a family out of {total} scanned"
            )));
        }

        Ok(MatchSummary {
            total,
            literal,
            degenerate,
            both,
            neither: total - either,
        })
    }

    /// Counts a classification table with lazy filters.
    ///
    /// The derived `neither` count is checked against a direct count of rows
    /// matching no family.
    ///
    /// # Errors
    /// * Returns `MotifError::DataError` if a column is missing or the counts disagree
    pub fn from_table(table: &ClassificationTable) -> Result<Self> {
        let summary = MatchSummary::new(
            table.height(),
            count_where(table, col(LITERAL_COLUMN))?,
            count_where(table, col(DEGENERATE_COLUMN))?,
            count_where(table, col(LITERAL_COLUMN).and(col(DEGENERATE_COLUMN)))?,
        )?;

        let neither = count_where(
            table,
            col(LITERAL_COLUMN).not().and(col(DEGENERATE_COLUMN).not()),
        )?;
        if neither != summary.neither {
            return Err(MotifError::DataError(format!(
                "{neither} records match no family, expected {}",
                summary.neither
            )));
        }

        Ok(summary)
    }

    pub fn from_results(results: &[ClassificationResult]) -> Result<Self> {
        MatchSummary::from_table(&classification_table(results)?)
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total sequences scanned: {}", self.total)?;
        writeln!(f, "Sequences matching a zic2 motif: {}", self.literal)?;
        writeln!(f, "Sequences matching the ctcf motif: {}", self.degenerate)?;
        writeln!(
            f,
            "Sequences matching a zic2 motif and the ctcf motif: {}",
            self.both
        )?;
        write!(f, "Sequences matching neither motif: {}", self.neither)
    }
}
