use crate::error::{MotifError, Result};
use crate::motif::{expand_degenerate, MotifConfig};
use crate::types::{ClassificationResult, SequenceRecord};
use regex::Regex;

/// Literal motif family, matched by exact substring containment
#[derive(Debug, Clone)]
pub struct LiteralMotifs {
    motifs: Vec<String>,
}

impl LiteralMotifs {
    pub fn new(motifs: Vec<String>) -> Self {
        LiteralMotifs { motifs }
    }

    pub fn motifs(&self) -> &[String] {
        &self.motifs
    }

    /// True if any motif occurs in `sequence`
    pub fn is_match(&self, sequence: &str) -> bool {
        self.motifs.iter().any(|m| sequence.contains(m.as_str()))
    }
}

/// Expanded degenerate motif family, searched as one escaped alternation
#[derive(Debug, Clone)]
pub struct VariantMotifs {
    variants: Vec<String>,
    // None when there are no variants; an empty alternation would match anything
    pattern: Option<Regex>,
}

impl VariantMotifs {
    /// Compiles the variants into a single search pattern.
    ///
    /// # Errors
    /// * Returns `MotifError::InvalidPattern` if the alternation exceeds the regex size limit
    pub fn new(variants: Vec<String>) -> Result<Self> {
        let pattern = if variants.is_empty() {
            None
        } else {
            let alternation = variants
                .iter()
                .map(|v| regex::escape(v))
                .collect::<Vec<_>>()
                .join("|");
            let re = Regex::new(&alternation)
                .map_err(|e| MotifError::invalid_pattern(e.to_string()))?;
            Some(re)
        };
        Ok(VariantMotifs { variants, pattern })
    }

    /// Expands `pattern` and compiles its variants
    pub fn from_degenerate(pattern: &str) -> Result<Self> {
        VariantMotifs::new(expand_degenerate(pattern))
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// True if any variant occurs in `sequence`
    pub fn is_match(&self, sequence: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|re| re.is_match(sequence))
    }
}

/// Classifies sequences against the literal (zic2) and degenerate (ctcf)
/// motif families.
///
/// Built once before a scan and shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct Classifier {
    literal: LiteralMotifs,
    degenerate: VariantMotifs,
}

impl Classifier {
    pub fn new(literal: LiteralMotifs, degenerate: VariantMotifs) -> Self {
        Classifier {
            literal,
            degenerate,
        }
    }

    /// Builds both families from a motif configuration, expanding the
    /// degenerate motif.
    ///
    /// # Errors
    /// * Returns `MotifError::InvalidPattern` if the expanded variants cannot be compiled
    pub fn from_config(config: &MotifConfig) -> Result<Self> {
        let degenerate = VariantMotifs::from_degenerate(&config.degenerate)?;
        log::debug!(
            "{} literal motifs, {} expanded from {}",
            config.literal.len(),
            degenerate.variants().len(),
            config.degenerate
        );
        Ok(Classifier::new(
            LiteralMotifs::new(config.literal.clone()),
            degenerate,
        ))
    }

    pub fn literal(&self) -> &LiteralMotifs {
        &self.literal
    }

    pub fn degenerate(&self) -> &VariantMotifs {
        &self.degenerate
    }

    /// Returns (literal family match, degenerate family match) for `sequence`
    pub fn classify(&self, sequence: &str) -> (bool, bool) {
        (
            self.literal.is_match(sequence),
            self.degenerate.is_match(sequence),
        )
    }

    /// Classifies a record, taking ownership so the outcome stays attached to it
    pub fn classify_record(&self, record: SequenceRecord) -> ClassificationResult {
        let (literal_match, degenerate_match) = self.classify(&record.seq);
        ClassificationResult {
            record,
            literal_match,
            degenerate_match,
        }
    }
}
