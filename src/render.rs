//! Textual views of an alignment.
//!
//! Two renderings share the `AlignmentFormat` trait:
//! - `FastaFormat`: the plain FASTA text the alignment was loaded from,
//!   re-parseable into an equivalent alignment
//! - `SnpFormat`: a difference view against the reference, with matching
//!   positions collapsed to '.' and only the deviating symbols spelled out
//!
//! The SNP view is derived and lossy; it cannot be parsed back into full
//! sequences.

use std::fmt::Write;

use crate::model::{Alignment, AlignmentResult};

/// The placeholder for a position that matches the reference.
const MATCH_SYMBOL: char = '.';

/// A rendering capability over a whole alignment.
pub trait AlignmentFormat {
    /// Renders the alignment to text.
    fn render(&self, alignment: &Alignment) -> AlignmentResult<String>;
}

/// Plain FASTA rendering: one header line and one symbol line per sequence,
/// in insertion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastaFormat;

impl AlignmentFormat for FastaFormat {
    fn render(&self, alignment: &Alignment) -> AlignmentResult<String> {
        Ok(alignment.to_string())
    }
}

/// SNP rendering: the reference in full, then every other sequence as a
/// line of reference length with '.' at each position that matches the
/// reference and the sequence's own symbol where it differs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnpFormat;

impl AlignmentFormat for SnpFormat {
    /// Fails with `OutOfBounds` when a non-reference sequence is shorter
    /// than the reference, the same condition as scoring.
    fn render(&self, alignment: &Alignment) -> AlignmentResult<String> {
        let reference = alignment.reference()?;

        let mut out = String::new();
        // Writes to a String cannot fail.
        let _ = writeln!(out, "{reference}");

        for sequence in alignment.iter().skip(1) {
            let _ = writeln!(out, "{}", sequence.header());
            for (i, &expected) in reference.symbols().iter().enumerate() {
                let symbol = sequence.get(i)?;
                if symbol == expected {
                    out.push(MATCH_SYMBOL);
                } else {
                    out.push(symbol as char);
                }
            }
            out.push('\n');
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fasta::parse_fasta_str;
    use crate::model::{AlignmentError, Sequence};

    fn sample_alignment() -> Alignment {
        Alignment::from_sequences([
            Sequence::with_symbols(">ref", "ACGTACGT"),
            Sequence::with_symbols(">x", "ACGAACGT"),
        ])
    }

    #[test]
    fn test_fasta_format_matches_display() {
        let alignment = sample_alignment();
        let rendered = FastaFormat.render(&alignment).unwrap();
        assert_eq!(rendered, ">ref\nACGTACGT\n>x\nACGAACGT\n");
    }

    #[test]
    fn test_fasta_format_round_trips() {
        let alignment = sample_alignment();
        let rendered = FastaFormat.render(&alignment).unwrap();
        let reparsed = parse_fasta_str(&rendered).unwrap();

        assert_eq!(
            reparsed.ids().collect::<Vec<_>>(),
            alignment.ids().collect::<Vec<_>>()
        );
        for (original, reloaded) in alignment.iter().zip(reparsed.iter()) {
            assert!(original.equals_by_content(reloaded));
        }
    }

    #[test]
    fn test_snp_format_dots_matching_positions() {
        let alignment = sample_alignment();
        let rendered = SnpFormat.render(&alignment).unwrap();
        assert_eq!(rendered, ">ref\nACGTACGT\n>x\n...A....\n");
    }

    #[test]
    fn test_snp_format_multiple_sequences() {
        let alignment = Alignment::from_sequences([
            Sequence::with_symbols(">ref", "AAAA"),
            Sequence::with_symbols(">b", "AATT"),
            Sequence::with_symbols(">c", "TAAA"),
        ]);
        let rendered = SnpFormat.render(&alignment).unwrap();
        assert_eq!(rendered, ">ref\nAAAA\n>b\n..TT\n>c\nT...\n");
    }

    #[test]
    fn test_snp_format_reference_only() {
        let alignment =
            Alignment::from_sequences([Sequence::with_symbols(">ref", "ACGT")]);
        let rendered = SnpFormat.render(&alignment).unwrap();
        assert_eq!(rendered, ">ref\nACGT\n");
    }

    #[test]
    fn test_snp_format_extra_length_is_truncated() {
        // The view is restricted to the reference length.
        let alignment = Alignment::from_sequences([
            Sequence::with_symbols(">ref", "ACGT"),
            Sequence::with_symbols(">b", "ACGTTTTT"),
        ]);
        let rendered = SnpFormat.render(&alignment).unwrap();
        assert_eq!(rendered, ">ref\nACGT\n>b\n....\n");
    }

    #[test]
    fn test_snp_format_fails_on_short_sequence() {
        let alignment = Alignment::from_sequences([
            Sequence::with_symbols(">ref", "ACGTACGT"),
            Sequence::with_symbols(">b", "ACGT"),
        ]);
        assert!(matches!(
            SnpFormat.render(&alignment),
            Err(AlignmentError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_snp_format_empty_alignment() {
        let alignment = Alignment::new();
        assert!(matches!(
            SnpFormat.render(&alignment),
            Err(AlignmentError::EmptyAlignment)
        ));
    }
}
