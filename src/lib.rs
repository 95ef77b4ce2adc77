//! # msaedit - Multiple Sequence Alignment Toolkit
//!
//! An in-memory toolkit for managing multiple sequence alignments: named
//! nucleotide sequences in an insertion-ordered collection, with substring
//! search, in-place substitution, removal, difference scoring against a
//! reference, and SNP difference rendering.
//!
//! ## Architecture
//!
//! The crate has a clear separation of concerns:
//! - `model`: sequences, the ordered alignment collection, and the shared
//!   error kinds
//! - `matcher`: the naive substring scan behind search and replacement
//! - `render`: rendering capabilities (plain FASTA and the SNP view)
//! - `fasta`: the FASTA loader/writer collaborator around the core
//!
//! The core consumes and produces plain values; files only appear at the
//! `fasta` boundary and in the command-line binary built on top.

pub mod fasta;
pub mod matcher;
pub mod model;
pub mod render;
