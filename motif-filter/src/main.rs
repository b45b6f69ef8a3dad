use clap::Parser;
use fasta_motif_rs::classify::Classifier;
use fasta_motif_rs::dispatch::classify_records;
use fasta_motif_rs::error::MotifError;
use fasta_motif_rs::fasta::{read_fasta, stage_fasta, DEFAULT_LINE_WIDTH};
use fasta_motif_rs::motif::{MotifConfig, CTCF_MOTIF, ZIC2_MOTIFS};
use fasta_motif_rs::report::{classification_table, select_matches, stage_table, MatchSummary};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Motif(#[from] MotifError),
}

#[derive(Parser)]
#[command(
    name = "motif-filter",
    about = "Filters FASTA sequences that carry both a zic2 motif and a ctcf motif",
    long_about = "A tool for motif presence/absence filtering of sequence collections. \
                  Every sequence is checked for the literal zic2 motifs and for any concrete \
                  variant of the degenerate ctcf consensus (N = A, C, G or T). Sequences with \
                  both are written to the output FASTA, and summary counts are printed.",
    version,
    after_help = "Example usage:\n    \
                  motif-filter -q peaks.fasta -o both.fasta --cores 8\n    \
                  motif-filter -q peaks.fasta -o both.fasta --table calls.csv",
    color = clap::ColorChoice::Always
)]
#[derive(Debug)]
struct Args {
    /// FASTA file to scan
    #[arg(short, long, value_name = "FASTA")]
    query: PathBuf,

    /// Output FASTA for sequences matching both motif families
    /// Will create output directory if it doesn't exist
    #[arg(short, long, value_name = "FASTA")]
    output: PathBuf,

    /// Number of worker threads
    /// Capped at the number of available cores
    #[arg(short, long, default_value = "2", value_parser = parse_cores)]
    cores: usize,

    /// Residues per output sequence line (0 writes each sequence on one line)
    #[arg(long, default_value_t = DEFAULT_LINE_WIDTH)]
    line_width: usize,

    /// Optional CSV with the per-sequence classification
    #[arg(long, value_name = "CSV")]
    table: Option<PathBuf>,

    /// Literal zic2 motif; repeat to replace the default set
    #[arg(long = "zic2-motif", value_name = "MOTIF", default_values_t = ZIC2_MOTIFS.map(String::from))]
    zic2_motifs: Vec<String>,

    /// Degenerate ctcf motif, N matching any base
    #[arg(long = "ctcf-motif", value_name = "MOTIF", default_value = CTCF_MOTIF)]
    ctcf_motif: String,
}

fn parse_cores(value: &str) -> Result<usize, String> {
    let cores: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if cores == 0 {
        return Err("at least one core is required".into());
    }
    Ok(cores)
}

fn create_parent_dir(path: &Path) -> Result<(), FilterError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<MatchSummary, FilterError> {
    let config = MotifConfig::new(args.zic2_motifs.as_slice(), args.ctcf_motif.as_str());
    let classifier = Classifier::from_config(&config)?;

    let records = read_fasta(&args.query)?;
    let results = classify_records(records, &classifier, args.cores)?;
    log::info!(
        "{} sequences classified from {}",
        results.len(),
        args.query.display()
    );

    let mut table = classification_table(&results)?;
    let summary = MatchSummary::from_table(&table)?;

    // both outputs are staged before either is moved into place
    let staged_table = match &args.table {
        Some(path) => {
            create_parent_dir(path)?;
            Some(stage_table(&mut table, path)?)
        }
        None => None,
    };
    create_parent_dir(&args.output)?;
    let (staged_fasta, written) =
        stage_fasta(select_matches(&results), &args.output, args.line_width)?;

    if let Some(staged) = staged_table {
        let path = staged.persist()?;
        log::info!("classification table written to {}", path.display());
    }
    let path = staged_fasta.persist()?;
    log::info!("{} records written to {}", written, path.display());

    Ok(summary)
}

fn main() -> Result<(), FilterError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let start_time = std::time::Instant::now();
    let args = Args::parse();

    let summary = run(&args)?;
    println!("{summary}");

    let elapsed = start_time.elapsed();
    log::info!("Total execution time: {:.4} seconds", elapsed.as_secs_f64());

    Ok(())
}
