//! msaedit - Multiple Sequence Alignment Toolkit
//!
//! Command-line front end over the alignment core.
//!
//! ## Usage
//!
//! ```bash
//! msaedit cat alignment.fasta
//! msaedit search alignment.fasta CGT
//! msaedit replace alignment.fasta AAA TTT -o edited.fasta
//! msaedit replace alignment.fasta AAA TTT --id 2022.F1.ZZ.93.VI850
//! msaedit score alignment.fasta
//! msaedit snp alignment.fasta
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use msaedit::fasta::{parse_fasta_file, write_fasta_file};
use msaedit::model::Alignment;
use msaedit::render::{AlignmentFormat, FastaFormat, SnpFormat};

/// A toolkit for multiple sequence alignments: search, edit, score, and
/// render SNP difference views over FASTA files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the alignment in FASTA format
    Cat {
        /// Alignment file (FASTA format)
        file: PathBuf,

        /// Output file. Use "-" for stdout.
        #[arg(short = 'o', long = "output", default_value = "-")]
        output: String,
    },

    /// List the identifiers of sequences containing a pattern
    Search {
        /// Alignment file (FASTA format)
        file: PathBuf,

        /// Pattern to search for, e.g. AACAAATG
        pattern: String,
    },

    /// Replace occurrences of a pattern with same-length text
    Replace {
        /// Alignment file (FASTA format)
        file: PathBuf,

        /// Pattern to replace
        pattern: String,

        /// Replacement text (must have the pattern's length)
        replacement: String,

        /// Only edit the sequence with this identifier
        #[arg(long = "id")]
        id: Option<String>,

        /// Output file. Use "-" for stdout.
        #[arg(short = 'o', long = "output", default_value = "-")]
        output: String,
    },

    /// Print the difference score against the reference sequence
    Score {
        /// Alignment file (FASTA format)
        file: PathBuf,
    },

    /// Print the SNP difference view against the reference sequence
    Snp {
        /// Alignment file (FASTA format)
        file: PathBuf,

        /// Output file. Use "-" for stdout.
        #[arg(short = 'o', long = "output", default_value = "-")]
        output: String,
    },
}

/// Writes rendered text to a file, or to stdout when `output` is "-".
fn write_output(output: &str, text: &str, alignment: &Alignment) -> Result<()> {
    if output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(text.as_bytes())?;
    } else {
        std::fs::write(output, text)?;
        eprintln!("Wrote {} sequences to {}", alignment.len(), output);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Cat { file, output } => {
            let alignment = parse_fasta_file(&file)?;
            let text = FastaFormat.render(&alignment)?;
            write_output(&output, &text, &alignment)?;
        }
        Command::Search { file, pattern } => {
            let alignment = parse_fasta_file(&file)?;
            for id in alignment.search(&pattern) {
                println!("{id}");
            }
        }
        Command::Replace {
            file,
            pattern,
            replacement,
            id,
            output,
        } => {
            let mut alignment = parse_fasta_file(&file)?;
            match id {
                Some(id) => alignment.replace_by_id(&id, &pattern, &replacement)?,
                None => alignment.replace_all(&pattern, &replacement)?,
            }
            if output == "-" {
                let text = FastaFormat.render(&alignment)?;
                write_output(&output, &text, &alignment)?;
            } else {
                write_fasta_file(&output, &alignment)?;
                eprintln!("Wrote {} sequences to {}", alignment.len(), output);
            }
        }
        Command::Score { file } => {
            let alignment = parse_fasta_file(&file)?;
            println!("{}", alignment.score()?);
        }
        Command::Snp { file, output } => {
            let alignment = parse_fasta_file(&file)?;
            let text = SnpFormat.render(&alignment)?;
            write_output(&output, &text, &alignment)?;
        }
    }

    Ok(())
}
