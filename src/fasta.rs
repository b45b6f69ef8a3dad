use crate::error::{MotifError, Result};
use crate::output::StagedFile;
use crate::types::SequenceRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;

/// Default number of residues per sequence line when writing
pub const DEFAULT_LINE_WIDTH: usize = 60;

/// Lazily parses FASTA records from a buffered reader.
///
/// Blank lines are ignored and sequence lines are concatenated without their
/// line endings. Sequence case is kept as read.
pub struct FastaReader<R: BufRead> {
    lines: Lines<R>,
    line_no: usize,
    pending_header: Option<String>,
    finished: bool,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        FastaReader {
            lines: reader.lines(),
            line_no: 0,
            pending_header: None,
            finished: false,
        }
    }

    fn next_record(&mut self) -> Result<Option<SequenceRecord>> {
        let mut sequence = String::new();

        for line in self.lines.by_ref() {
            let line = line?;
            self.line_no += 1;
            let line = line.trim_end();

            if let Some(header) = line.strip_prefix('>') {
                match self.pending_header.replace(header.to_string()) {
                    Some(previous) => {
                        return Ok(Some(SequenceRecord::from_header(&previous, sequence)));
                    }
                    None => continue,
                }
            }

            if line.is_empty() {
                continue;
            }
            if self.pending_header.is_none() {
                return Err(MotifError::invalid_file_format(
                    self.line_no,
                    "sequence data before the first '>' header",
                ));
            }
            sequence.push_str(line);
        }

        self.finished = true;
        Ok(self
            .pending_header
            .take()
            .map(|header| SequenceRecord::from_header(&header, sequence)))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<SequenceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Opens a FASTA file for lazy, record-by-record reading.
///
/// # Arguments
/// * `filename` - Path to the FASTA file to read
///
/// # Returns
/// * `Result<FastaReader<BufReader<File>>>` - An iterator yielding one
///   `Result<SequenceRecord>` per entry. An empty file yields nothing.
///
/// # Errors
/// * Returns `MotifError::Io` if the file cannot be opened
/// * The iterator yields `MotifError::InvalidFileFormat` for sequence data
///   preceding the first header, and `MotifError::Io` for read failures
pub fn read_fasta(filename: impl AsRef<Path>) -> Result<FastaReader<BufReader<File>>> {
    let file = File::open(filename)?;
    Ok(FastaReader::new(BufReader::new(file)))
}

/// Writes one record: the header line, then the sequence in lines of
/// `line_width` characters (`0` keeps the sequence on one line).
pub fn write_record<W: Write>(
    writer: &mut W,
    record: &SequenceRecord,
    line_width: usize,
) -> Result<()> {
    writeln!(writer, ">{}", record.description)?;
    let seq = record.seq.as_str();
    if seq.is_empty() {
        return Ok(());
    }
    if line_width == 0 {
        writeln!(writer, "{}", seq)?;
        return Ok(());
    }

    // break on character boundaries so multi-byte text stays valid UTF-8
    let ends = seq
        .char_indices()
        .map(|(i, _)| i)
        .step_by(line_width)
        .skip(1)
        .chain(std::iter::once(seq.len()));
    let mut start = 0;
    for end in ends {
        writeln!(writer, "{}", &seq[start..end])?;
        start = end;
    }
    Ok(())
}

/// Writes records to a staged FASTA file without moving it into place.
///
/// # Returns
/// * `Result<(StagedFile, usize)>` - The staged file and the number of records written
///
/// # Errors
/// * Returns `MotifError::Io` for file writing issues
pub fn stage_fasta<'a, I>(
    records: I,
    filename: impl AsRef<Path>,
    line_width: usize,
) -> Result<(StagedFile, usize)>
where
    I: IntoIterator<Item = &'a SequenceRecord>,
{
    let mut staged = StagedFile::new(filename)?;
    let mut written = 0;
    {
        let mut writer = BufWriter::new(staged.file_mut());
        for record in records {
            write_record(&mut writer, record, line_width)?;
            written += 1;
        }
        writer.flush()?;
    }
    Ok((staged, written))
}

/// Writes records to a FASTA file.
///
/// The records are written to a temporary file next to `filename`, which
/// replaces `filename` only once every record has been written.
///
/// # Arguments
/// * `records` - Records to write, in order
/// * `filename` - Path where the FASTA file should be written
/// * `line_width` - Residues per sequence line, `0` for unwrapped output
///
/// # Returns
/// * `Result<usize>` - Number of records written
///
/// # Errors
/// * Returns `MotifError::Io` for file writing issues; `filename` is left untouched
pub fn write_fasta<'a, I>(
    records: I,
    filename: impl AsRef<Path>,
    line_width: usize,
) -> Result<usize>
where
    I: IntoIterator<Item = &'a SequenceRecord>,
{
    let (staged, written) = stage_fasta(records, filename, line_width)?;
    let filename = staged.persist()?;

    log::info!("{} records written to {}", written, filename.display());
    Ok(written)
}
