//! Command-line argument parsing for `ktmode`
//!
//! Every subcommand takes a Kotlin file. Lines given by the user are
//! 1-indexed and converted to 0-indexed before use.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Kotlin highlighting, indentation, outline and test runner
#[derive(Parser, Debug)]
#[command(name = "ktmode", version, about = "Kotlin editing support")]
pub struct CliArgs {
    /// Configuration file (defaults to ~/.config/ktmode/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print highlight spans
    Highlight {
        file: PathBuf,

        /// First byte of the range
        #[arg(long, value_name = "N")]
        start: Option<usize>,

        /// End byte of the range (exclusive)
        #[arg(long, value_name = "N")]
        end: Option<usize>,

        /// Highlight level (1-4), overrides the configured one
        #[arg(long, value_name = "N", conflicts_with = "features")]
        level: Option<u8>,

        /// Comma-separated feature groups to activate
        #[arg(long, value_delimiter = ',', value_name = "NAMES")]
        features: Option<Vec<String>>,

        #[arg(long)]
        json: bool,
    },

    /// Print the indentation column for a line
    Indent {
        file: PathBuf,

        /// Line number (1-indexed)
        #[arg(long, value_name = "N")]
        line: usize,
    },

    /// Print the outline grouped by category
    Outline {
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Run the test function (or class) around a position
    Test {
        file: PathBuf,

        /// Byte offset of the cursor
        #[arg(long, value_name = "N", conflicts_with = "line", required_unless_present = "line")]
        offset: Option<usize>,

        /// Line of the cursor (1-indexed)
        #[arg(long, value_name = "N")]
        line: Option<usize>,

        /// Run the whole enclosing class
        #[arg(long)]
        class: bool,

        /// Print the command instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the test file for a source file, or the reverse
    OtherFile { file: PathBuf },
}

/// Where the cursor is for `test`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPosition {
    Offset(usize),
    /// 0-indexed line
    Line(usize),
}

impl CursorPosition {
    /// Convert the `test` arguments, turning the 1-indexed line into a
    /// 0-indexed one
    pub fn from_args(offset: Option<usize>, line: Option<usize>) -> Option<Self> {
        match (offset, line) {
            (Some(offset), _) => Some(CursorPosition::Offset(offset)),
            (None, Some(line)) => Some(CursorPosition::Line(line.saturating_sub(1))),
            (None, None) => None,
        }
    }
}
