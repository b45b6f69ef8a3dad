use fasta_motif_rs::classify::Classifier;
use fasta_motif_rs::dispatch::classify_records;
use fasta_motif_rs::fasta;
use fasta_motif_rs::motif::MotifConfig;
use fasta_motif_rs::report::{
    classification_table, select_matches, write_table, MatchSummary, DEGENERATE_COLUMN,
    ID_COLUMN, LITERAL_COLUMN,
};
use fasta_motif_rs::types::{ClassificationResult, SequenceRecord};
use tempfile::tempdir;

fn result(id: &str, literal_match: bool, degenerate_match: bool) -> ClassificationResult {
    ClassificationResult {
        record: SequenceRecord::new(id, "ACGT"),
        literal_match,
        degenerate_match,
    }
}

fn five_results() -> Vec<ClassificationResult> {
    vec![
        result("a1", true, false),
        result("a2", true, false),
        result("b1", false, true),
        result("ab", true, true),
        result("none", false, false),
    ]
}

#[test]
fn test_summary_counts() {
    let summary = MatchSummary::from_results(&five_results()).unwrap();
    assert_eq!(
        summary,
        MatchSummary {
            total: 5,
            literal: 3,
            degenerate: 2,
            both: 1,
            neither: 1,
        }
    );
}

#[test]
fn test_summary_of_empty_results() {
    let summary = MatchSummary::from_results(&[]).unwrap();
    assert_eq!(summary, MatchSummary::default());
}

#[test]
fn test_inclusion_exclusion_identity() {
    let flags = [(true, true), (true, false), (false, true), (false, false)];
    for mask in 0..256u32 {
        let results: Vec<_> = (0..4)
            .map(|i| {
                let (l, d) = flags[((mask >> (2 * i)) & 3) as usize];
                result(&format!("r{i}"), l, d)
            })
            .collect();
        let s = MatchSummary::from_results(&results).unwrap();
        assert_eq!(s.neither, s.total - (s.literal + s.degenerate - s.both));
        assert_eq!(s.neither, results.iter().filter(|r| r.neither()).count());
    }
}

#[test]
fn test_summary_rejects_inconsistent_counts() {
    assert!(MatchSummary::new(5, 1, 3, 2).is_err());
    assert!(MatchSummary::new(2, 2, 2, 1).is_err());
    assert_eq!(MatchSummary::new(4, 2, 2, 0).unwrap().neither, 0);
}

#[test]
fn test_classification_table() {
    let table = classification_table(&five_results()).unwrap();
    assert_eq!(table.height(), 5);
    assert_eq!(table.width(), 3);
    for name in [ID_COLUMN, LITERAL_COLUMN, DEGENERATE_COLUMN] {
        assert!(table.column(name).is_ok(), "missing column {name}");
    }
}

#[test]
fn test_write_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("calls.csv");
    let mut table = classification_table(&five_results()).unwrap();

    write_table(&mut table, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id,zic2_match,ctcf_match"));
    assert_eq!(lines.next(), Some("a1,true,false"));
    assert_eq!(text.lines().count(), 6);
}

#[test]
fn test_select_matches() {
    let results = five_results();
    let ids: Vec<&str> = select_matches(&results).map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["ab"]);
}

#[test]
fn test_end_to_end_scan() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("both.fasta");
    let classifier = Classifier::from_config(&MotifConfig::default()).unwrap();

    let records = fasta::read_fasta("tests/data/five_records.fasta").unwrap();
    let results = classify_records(records, &classifier, 4).unwrap();
    let summary = MatchSummary::from_results(&results).unwrap();
    fasta::write_fasta(select_matches(&results), &output, fasta::DEFAULT_LINE_WIDTH).unwrap();

    assert_eq!(summary.total, 5);
    assert_eq!(summary.literal, 3);
    assert_eq!(summary.degenerate, 2);
    assert_eq!(summary.both, 1);
    assert_eq!(summary.neither, 1);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        std::fs::read_to_string("tests/data/both_expected.fasta").unwrap()
    );
}

#[test]
fn test_summary_display() {
    let summary = MatchSummary::new(5, 3, 2, 1).unwrap();
    let text = summary.to_string();
    assert!(text.starts_with("Total sequences scanned: 5\n"));
    assert!(text.ends_with("Sequences matching neither motif: 1"));
    assert_eq!(text.lines().count(), 5);
}
