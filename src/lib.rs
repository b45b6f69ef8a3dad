//! Degenerate motif expansion and parallel two-family motif filtering of FASTA sequences

pub mod classify;
pub mod dispatch;
pub mod error;
pub mod fasta;
pub mod motif;
pub mod output;
pub mod report;
pub mod types;
