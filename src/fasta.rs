//! FASTA loading and writing.
//!
//! The core model works on in-memory values only; this module is the
//! collaborator that turns FASTA text into an `Alignment` and serialises an
//! `Alignment` back to storage. Everything is an explicit function over
//! explicit values; there is no shared reader or writer state.
//!
//! ## FASTA format
//!
//! ```text
//! >sequence_identifier
//! ACGTACGTACGT...
//! >another_sequence
//! TGCATGCATGCA...
//! ```
//!
//! The full trimmed header line, including the leading '>', becomes the
//! sequence identifier, so that rendering an alignment reproduces its
//! input byte for byte.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::model::{Alignment, Sequence};

/// Errors that can occur while reading or writing FASTA data.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to access file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Empty FASTA input")]
    EmptyInput,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence data without a header at line {0}")]
    MissingHeader(usize),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Parses FASTA content into an alignment.
///
/// Header lines start with '>'; the non-blank lines that follow, up to the
/// next header, are concatenated into the sequence's symbols (whitespace
/// stripped). Blank lines are ignored everywhere. A header with no symbol
/// lines yields a sequence with no symbols, awaiting data.
pub fn parse_fasta_str(content: &str) -> FastaResult<Alignment> {
    let mut alignment = Alignment::new();
    let mut current: Option<Sequence> = None;
    let mut current_symbols = String::new();
    let mut line_number = 0;

    for line in content.lines() {
        line_number += 1;
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        if line.starts_with('>') {
            // Save previous sequence if one is open
            if let Some(mut sequence) = current.take() {
                sequence.assign(&current_symbols);
                alignment.insert(sequence);
                current_symbols.clear();
            }

            if line.len() == 1 {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {line_number}"
                )));
            }

            current = Some(Sequence::new(line));
        } else {
            // Sequence line
            if current.is_none() {
                return Err(FastaError::MissingHeader(line_number));
            }

            current_symbols.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }

    // Don't forget the last sequence
    if let Some(mut sequence) = current {
        sequence.assign(&current_symbols);
        alignment.insert(sequence);
    }

    if alignment.is_empty() {
        return Err(FastaError::EmptyInput);
    }

    Ok(alignment)
}

/// Parses a FASTA file into an alignment.
///
/// # Examples
///
/// ```no_run
/// use msaedit::fasta::parse_fasta_file;
///
/// let alignment = parse_fasta_file("sequences.fasta").unwrap();
/// println!("Loaded {} sequences", alignment.len());
/// ```
pub fn parse_fasta_file<P: AsRef<Path>>(path: P) -> FastaResult<Alignment> {
    let file = File::open(&path)?;
    let file_size = file.metadata()?.len() as usize;

    let mut reader = BufReader::new(file);
    let mut content = String::with_capacity(file_size);
    reader.read_to_string(&mut content)?;

    parse_fasta_str(&content)
}

/// Writes an alignment to a file in FASTA format.
///
/// The output is the alignment's plain rendering and re-parses into an
/// equivalent alignment.
pub fn write_fasta_file<P: AsRef<Path>>(path: P, alignment: &Alignment) -> FastaResult<()> {
    let mut file = File::create(path)?;
    file.write_all(alignment.to_string().as_bytes())?;
    Ok(())
}
