/// Wildcard character in a degenerate motif
pub const WILDCARD: char = 'N';

/// Substitution order for a wildcard position
pub const BASES: [char; 4] = ['A', 'C', 'G', 'T'];

/// Literal zic2 motifs, matched by exact substring containment
pub const ZIC2_MOTIFS: [&str; 3] = ["TGAGGCT", "GCGTGGG", "TGGGAGG"];

/// Degenerate ctcf consensus, expanded before matching
pub const CTCF_MOTIF: &str = "CCGCGNGGNGGCAG";

/// Counts the wildcard positions of a degenerate motif
pub fn wildcard_count(pattern: &str) -> usize {
    pattern.chars().filter(|&c| c == WILDCARD).count()
}

/// Expands a degenerate motif into every concrete literal it stands for.
///
/// The first remaining `N` is replaced by each of A, C, G and T in turn and the
/// result is expanded again, so variants come out in a fixed order: the
/// leftmost wildcard varies slowest. Only `N` is special; every other character
/// is copied through unchanged.
///
/// # Arguments
/// * `pattern` - Motif string over {A,C,G,T,N}
///
/// # Returns
/// * `Vec<String>` - 4^k distinct strings for a pattern with k wildcards, each
///   the length of `pattern`. A pattern without wildcards yields itself.
///
/// # Example
/// ```
/// use fasta_motif_rs::motif::expand_degenerate;
///
/// let variants = expand_degenerate("ANG");
/// assert_eq!(variants, ["AAG", "ACG", "AGG", "ATG"]);
/// ```
pub fn expand_degenerate(pattern: &str) -> Vec<String> {
    let Some(pos) = pattern.find(WILDCARD) else {
        return vec![pattern.to_string()];
    };

    let (head, tail) = (&pattern[..pos], &pattern[pos + WILDCARD.len_utf8()..]);
    BASES
        .iter()
        .flat_map(|base| {
            let mut candidate = String::with_capacity(pattern.len());
            candidate.push_str(head);
            candidate.push(*base);
            candidate.push_str(tail);
            expand_degenerate(&candidate)
        })
        .collect()
}

/// Motif definitions for the two families, built once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifConfig {
    /// Literal family (zic2)
    pub literal: Vec<String>,
    /// Degenerate family (ctcf) before expansion
    pub degenerate: String,
}

impl MotifConfig {
    pub fn new<S: AsRef<str>>(literal: &[S], degenerate: impl Into<String>) -> Self {
        MotifConfig {
            literal: literal.iter().map(|m| m.as_ref().to_string()).collect(),
            degenerate: degenerate.into(),
        }
    }
}

impl Default for MotifConfig {
    fn default() -> Self {
        MotifConfig::new(&ZIC2_MOTIFS[..], CTCF_MOTIF)
    }
}
