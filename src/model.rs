//! Data model for sequence alignments.
//!
//! This module contains the core data structures:
//! - `Sequence`: a named, mutable string of nucleotide symbols
//! - `Alignment`: an insertion-ordered collection of sequences
//! - `AlignmentError`: the failure kinds shared by all alignment operations
//!
//! The first sequence inserted into an alignment is its *reference*: the
//! baseline that difference scoring and SNP rendering compare against. When
//! the reference is removed, the next surviving entry takes its place.
//!
//! ```
//! use msaedit::model::{Alignment, Sequence};
//!
//! let mut alignment = Alignment::new();
//! alignment.insert(Sequence::with_symbols(">ref", "ACGTACGT"));
//! alignment.insert(Sequence::with_symbols(">x", "ACGAACGT"));
//!
//! assert_eq!(alignment.score().unwrap(), 1);
//! assert_eq!(alignment.search("CGT"), vec![">ref".to_string(), ">x".to_string()]);
//! ```

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use log::{debug, trace};
use thiserror::Error;

use crate::matcher;

/// Errors that can occur during alignment operations.
#[derive(Error, Debug)]
pub enum AlignmentError {
    #[error("Position {index} is out of bounds for sequence of length {len}")]
    OutOfBounds { index: usize, len: usize },

    #[error("Replacement length {actual} does not match expected length {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("The alignment contains no sequences")]
    EmptyAlignment,
}

/// Result type for alignment operations.
pub type AlignmentResult<T> = Result<T, AlignmentError>;

/// A single named sequence of nucleotide symbols.
///
/// Symbols are stored as raw bytes; FASTA data is ASCII in practice. A
/// sequence starts out without symbols and receives them in one `assign`
/// call; afterwards its length only changes through another wholesale
/// assignment, never through the targeted edit operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence identifier (full FASTA header line, usually with '>')
    id: String,
    /// The sequence data (nucleotides)
    symbols: Vec<u8>,
}

impl Sequence {
    /// Creates a new sequence with no symbols.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbols: Vec::new(),
        }
    }

    /// Creates a sequence and assigns its symbols in one step.
    pub fn with_symbols(id: impl Into<String>, symbols: impl AsRef<str>) -> Self {
        let mut sequence = Self::new(id);
        sequence.assign(symbols.as_ref());
        sequence
    }

    /// Returns the sequence identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Gives the sequence a new identifier.
    pub fn rename(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Returns the identifier as a FASTA header line, prepending '>' unless
    /// the identifier already carries it.
    pub fn header(&self) -> Cow<'_, str> {
        if self.id.starts_with('>') {
            Cow::Borrowed(&self.id)
        } else {
            Cow::Owned(format!(">{}", self.id))
        }
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the sequence has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the raw symbols.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Returns the symbols as text.
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.symbols)
    }

    /// Returns the symbol at `index`.
    pub fn get(&self, index: usize) -> AlignmentResult<u8> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(AlignmentError::OutOfBounds {
                index,
                len: self.symbols.len(),
            })
    }

    /// Overwrites the symbol at `index`.
    pub fn set(&mut self, index: usize, symbol: u8) -> AlignmentResult<()> {
        let len = self.symbols.len();
        match self.symbols.get_mut(index) {
            Some(slot) => {
                *slot = symbol;
                Ok(())
            }
            None => Err(AlignmentError::OutOfBounds { index, len }),
        }
    }

    /// Replaces the symbols wholesale with the characters of `text`.
    ///
    /// This is the load path: it always succeeds and may change the length,
    /// including down to zero.
    pub fn assign(&mut self, text: &str) {
        self.symbols = text.as_bytes().to_vec();
    }

    /// Replaces every symbol with `new_text`, which must have the same
    /// length as the current sequence.
    pub fn replace_whole(&mut self, new_text: &str) -> AlignmentResult<()> {
        if new_text.len() != self.symbols.len() {
            return Err(AlignmentError::LengthMismatch {
                expected: self.symbols.len(),
                actual: new_text.len(),
            });
        }
        self.symbols.copy_from_slice(new_text.as_bytes());
        Ok(())
    }

    /// Overwrites a run of symbols starting at `start` with `chunk`.
    ///
    /// The run must lie entirely within the sequence.
    pub fn write_at(&mut self, start: usize, chunk: &[u8]) -> AlignmentResult<()> {
        let end = start + chunk.len();
        if end > self.symbols.len() {
            return Err(AlignmentError::OutOfBounds {
                index: end,
                len: self.symbols.len(),
            });
        }
        self.symbols[start..end].copy_from_slice(chunk);
        Ok(())
    }

    /// Returns true if a full occurrence of `pattern` appears in this
    /// sequence.
    pub fn contains(&self, pattern: &str) -> bool {
        matcher::contains(&self.symbols, pattern.as_bytes())
    }

    /// Replaces every non-overlapping occurrence of `pattern` with
    /// `replacement` and returns how many occurrences were rewritten.
    pub fn replace_occurrences(
        &mut self,
        pattern: &str,
        replacement: &str,
    ) -> AlignmentResult<usize> {
        matcher::replace_in_place(
            &mut self.symbols,
            pattern.as_bytes(),
            replacement.as_bytes(),
        )
    }

    /// Structural equality of the symbols, independent of the identifier.
    pub fn equals_by_content(&self, other: &Sequence) -> bool {
        self.symbols == other.symbols
    }

    /// Returns true if this sequence's identifier equals `id_query`, or its
    /// rendered symbol list equals `content_query`.
    ///
    /// The content comparison is against the debug rendering of the symbol
    /// list, not the raw text. Existing callers depend on this exact form.
    pub fn matches(&self, id_query: &str, content_query: &str) -> bool {
        if self.id == id_query {
            return true;
        }

        let rendered = format!(
            "{:?}",
            self.symbols.iter().map(|&b| b as char).collect::<Vec<_>>()
        );
        rendered == content_query
    }

    /// Counts the positions where this sequence differs from `reference`,
    /// over the reference's full length.
    ///
    /// Fails with `OutOfBounds` when this sequence is shorter than the
    /// reference.
    pub fn distance_from(&self, reference: &Sequence) -> AlignmentResult<usize> {
        let mut diff_score = 0;
        for (i, &expected) in reference.symbols.iter().enumerate() {
            if self.get(i)? != expected {
                diff_score += 1;
            }
        }
        Ok(diff_score)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        write!(f, "{}", self.as_str())
    }
}

/// An insertion-ordered collection of sequences keyed by identifier.
///
/// Re-inserting an existing identifier overwrites its sequence but keeps the
/// entry's original position, so the reference stays stable. The alignment
/// exclusively owns its sequences; cloning deep-copies every entry.
#[derive(Debug, Clone, Default)]
pub struct Alignment {
    entries: IndexMap<String, Sequence>,
}

impl Alignment {
    /// Creates an empty alignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an alignment from sequences, preserving their order.
    pub fn from_sequences(sequences: impl IntoIterator<Item = Sequence>) -> Self {
        let mut alignment = Self::new();
        for sequence in sequences {
            alignment.insert(sequence);
        }
        alignment
    }

    /// Returns the number of sequences.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the alignment has no sequences.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a sequence, or overwrites the one with the same identifier.
    pub fn insert(&mut self, sequence: Sequence) {
        self.entries.insert(sequence.id().to_string(), sequence);
    }

    /// Removes the sequence with the given identifier, if present, and
    /// returns it. The remaining entries keep their order.
    pub fn remove(&mut self, id: &str) -> Option<Sequence> {
        self.entries.shift_remove(id)
    }

    /// Gets a sequence by identifier.
    pub fn get(&self, id: &str) -> Option<&Sequence> {
        self.entries.get(id)
    }

    /// Returns the reference sequence: the first-inserted entry still
    /// present in the alignment.
    pub fn reference(&self) -> AlignmentResult<&Sequence> {
        self.entries
            .values()
            .next()
            .ok_or(AlignmentError::EmptyAlignment)
    }

    /// Iterates over the sequences in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Sequence> {
        self.entries.values()
    }

    /// Iterates over the identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the identifiers of all sequences containing `pattern`, in
    /// insertion order. An empty pattern matches nothing.
    pub fn search(&self, pattern: &str) -> Vec<String> {
        if pattern.is_empty() {
            return Vec::new();
        }

        let matched: Vec<String> = self
            .entries
            .values()
            .filter(|sequence| sequence.contains(pattern))
            .map(|sequence| sequence.id().to_string())
            .collect();
        debug!(
            "search for {:?} matched {} sequence(s)",
            pattern,
            matched.len()
        );
        matched
    }

    /// Returns the first sequence whose identifier equals `id_query` or
    /// whose rendered symbol list equals `content_query`.
    pub fn find_by_id_or_content(
        &self,
        id_query: &str,
        content_query: &str,
    ) -> Option<&Sequence> {
        self.entries
            .values()
            .find(|sequence| sequence.matches(id_query, content_query))
    }

    /// Replaces all occurrences of `pattern` with `replacement` in the
    /// sequence identified by `id`.
    ///
    /// A bare identifier is normalised with a leading '>'. An identifier
    /// that matches no sequence is a silent no-op.
    pub fn replace_by_id(
        &mut self,
        id: &str,
        pattern: &str,
        replacement: &str,
    ) -> AlignmentResult<()> {
        if id.is_empty() || pattern.is_empty() || replacement.is_empty() {
            return Err(AlignmentError::InvalidArgument(
                "the identifier, pattern and replacement must all be non-empty".to_string(),
            ));
        }
        if pattern.len() != replacement.len() {
            return Err(AlignmentError::LengthMismatch {
                expected: pattern.len(),
                actual: replacement.len(),
            });
        }

        let id = if id.starts_with('>') {
            Cow::Borrowed(id)
        } else {
            Cow::Owned(format!(">{id}"))
        };
        if let Some(sequence) = self.entries.get_mut(id.as_ref()) {
            let replaced = sequence.replace_occurrences(pattern, replacement)?;
            debug!("replaced {replaced} occurrence(s) in {id}");
        }
        Ok(())
    }

    /// Replaces all occurrences of `pattern` with `replacement` in every
    /// sequence.
    ///
    /// Arguments are validated before any sequence is touched, so a failure
    /// leaves the alignment unchanged.
    pub fn replace_all(&mut self, pattern: &str, replacement: &str) -> AlignmentResult<()> {
        if pattern.is_empty() || replacement.is_empty() {
            return Err(AlignmentError::InvalidArgument(
                "the pattern and replacement must both be non-empty".to_string(),
            ));
        }
        if pattern.len() != replacement.len() {
            return Err(AlignmentError::InvalidArgument(format!(
                "the pattern length ({}) and replacement length ({}) differ",
                pattern.len(),
                replacement.len()
            )));
        }

        let mut replaced = 0;
        for sequence in self.entries.values_mut() {
            replaced += sequence.replace_occurrences(pattern, replacement)?;
        }
        debug!(
            "replaced {replaced} occurrence(s) of {:?} across {} sequence(s)",
            pattern,
            self.entries.len()
        );
        Ok(())
    }

    /// Replaces the entire symbol content of the sequence identified by
    /// `id`. The new text must match the sequence's current length.
    pub fn replace_whole_by_id(&mut self, id: &str, new_text: &str) -> AlignmentResult<()> {
        let sequence = self.entries.get_mut(id).ok_or_else(|| {
            AlignmentError::InvalidArgument(format!("no sequence with identifier {id:?}"))
        })?;
        sequence.replace_whole(new_text)
    }

    /// Returns the difference score of this alignment: the sum over every
    /// non-reference sequence of its Hamming distance to the reference,
    /// taken over the reference's full length.
    ///
    /// Fails with `OutOfBounds` when any non-reference sequence is shorter
    /// than the reference.
    pub fn score(&self) -> AlignmentResult<usize> {
        let reference = self.reference()?;

        let mut diff_score = 0;
        for sequence in self.entries.values().skip(1) {
            let distance = sequence.distance_from(reference)?;
            trace!("distance of {} to reference: {distance}", sequence.id());
            diff_score += distance;
        }
        Ok(diff_score)
    }
}

impl fmt::Display for Alignment {
    /// Renders the alignment in the FASTA format it was loaded from: one
    /// header line and one symbol line per sequence.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sequence in self.entries.values() {
            writeln!(f, "{sequence}")?;
        }
        Ok(())
    }
}
