use fasta_motif_rs::classify::Classifier;
use fasta_motif_rs::dispatch::{
    available_workers, classify_records, effective_workers, WorkerPool,
};
use fasta_motif_rs::error::MotifError;
use fasta_motif_rs::fasta;
use fasta_motif_rs::motif::MotifConfig;
use fasta_motif_rs::types::{ClassificationResult, SequenceRecord};
use std::collections::HashMap;
use std::io::Cursor;

fn synthetic_records(n: usize) -> Vec<SequenceRecord> {
    (0..n)
        .map(|i| {
            let seq = match i % 4 {
                0 => format!("AC{}TGAGGCT", "T".repeat(i)),
                1 => format!("CCGCGTGGAGGCAG{}", "A".repeat(i)),
                2 => format!("GCGTGGG{}CCGCGCGGCGGCAG", "C".repeat(i)),
                _ => "ACGT".repeat(i + 1),
            };
            SequenceRecord::new(format!("seq{i}"), seq)
        })
        .collect()
}

fn by_id(results: Vec<ClassificationResult>) -> HashMap<String, (bool, bool)> {
    let mut map = HashMap::new();
    for r in results {
        let previous = map.insert(r.record.id.clone(), (r.literal_match, r.degenerate_match));
        assert!(previous.is_none(), "{} classified twice", r.record.id);
    }
    map
}

#[test]
fn test_effective_workers_clamped() {
    let available = available_workers();
    assert!(available >= 1);
    assert_eq!(effective_workers(1), 1);
    assert_eq!(effective_workers(available + 16), available);
    assert_eq!(effective_workers(0), 1);
}

#[test]
fn test_every_record_classified_once() {
    let classifier = Classifier::from_config(&MotifConfig::default()).unwrap();
    let records = synthetic_records(200);

    let stream = records.iter().cloned().map(Ok::<_, MotifError>);
    let results = classify_records(stream, &classifier, 4).unwrap();
    assert_eq!(results.len(), records.len());

    for result in &results {
        let expected = classifier.classify(&result.record.seq);
        assert_eq!((result.literal_match, result.degenerate_match), expected);
    }
    let map = by_id(results);
    assert!(records.iter().all(|r| map.contains_key(&r.id)));
}

#[test]
fn test_worker_count_does_not_change_classification() {
    let classifier = Classifier::from_config(&MotifConfig::default()).unwrap();
    let records = synthetic_records(64);

    let stream = || records.iter().cloned().map(Ok::<_, MotifError>);
    let single = classify_records(stream(), &classifier, 1).unwrap();
    let many = classify_records(stream(), &classifier, 4).unwrap();

    assert_eq!(single.len(), 64);
    assert_eq!(by_id(single), by_id(many));
}

#[test]
fn test_classify_fasta_stream() {
    let classifier = Classifier::from_config(&MotifConfig::default()).unwrap();
    let records = fasta::read_fasta("tests/data/five_records.fasta").unwrap();

    let map = by_id(classify_records(records, &classifier, 2).unwrap());
    assert_eq!(map.len(), 5);
    assert_eq!(map["zic2_only_1"], (true, false));
    assert_eq!(map["zic2_only_2"], (true, false));
    assert_eq!(map["ctcf_only"], (false, true));
    assert_eq!(map["both"], (true, true));
    assert_eq!(map["neither"], (false, false));
}

#[test]
fn test_empty_input() {
    let classifier = Classifier::from_config(&MotifConfig::default()).unwrap();
    let records: Vec<Result<SequenceRecord, MotifError>> = Vec::new();
    let results = classify_records(records, &classifier, 3).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_source_error_aborts_scan() {
    let classifier = Classifier::from_config(&MotifConfig::default()).unwrap();
    let text = ">ok\nTGAGGCT\n";
    let records = fasta::FastaReader::new(Cursor::new(text))
        .chain(std::iter::once(Err(MotifError::invalid_file_format(3, "truncated"))));

    let result = classify_records(records, &classifier, 2);
    assert!(matches!(result, Err(MotifError::InvalidFileFormat { line: 3, .. })));

    let malformed = fasta::read_fasta("tests/data/malformed.fasta").unwrap();
    assert!(classify_records(malformed, &classifier, 2).is_err());
}

#[test]
fn test_worker_pool_try_map() {
    let pool = WorkerPool::new(2).unwrap();
    assert!(pool.workers() >= 1 && pool.workers() <= 2);

    let mut squares = pool
        .try_map((1..=10u64).map(Ok::<_, MotifError>), |x| x * x)
        .unwrap();
    squares.sort_unstable();
    assert_eq!(squares, vec![1, 4, 9, 16, 25, 36, 49, 64, 81, 100]);
}
