//! CLI - Command-line argument parsing
//!
//! Defines the CLI structure using clap.
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand, ValueEnum};
use factcheck_common::{ExtractionMode, ScorePolicy, ScreenProfile, Selection};
use std::path::PathBuf;

/// FactCheck CLI
#[derive(Parser)]
#[command(name = "factcheckctl")]
#[command(about = "Fact-check text with a chat-completion model", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Fact-check text (argument, --file, or stdin)
    Check(CheckArgs),

    /// Interpret a raw model reply offline (--file or stdin)
    Interpret {
        #[arg(long)]
        file: Option<PathBuf>,

        /// Override the configured score policy
        #[arg(long, value_enum)]
        score_policy: Option<ScorePolicyArg>,

        /// Override the configured extraction mode
        #[arg(long, value_enum)]
        extraction: Option<ExtractionArg>,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Show the rating bucket for a score (omit for "Not Rated")
    Rate {
        #[arg(allow_negative_numbers = true)]
        score: Option<i64>,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// List selectable models
    Models,

    /// Show effective configuration
    Config {
        /// Write the default config file
        #[arg(long)]
        init: bool,
    },
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Text to check
    pub text: Option<String>,

    /// Read text from a file
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Screen to emulate
    #[arg(long, value_enum, default_value_t = Mode::Professional)]
    pub mode: Mode,

    /// Model id (professional mode only)
    #[arg(long)]
    pub model: Option<String>,

    /// Check only characters START:END of the input
    #[arg(long, value_name = "START:END")]
    pub select: Option<Selection>,

    /// Previous analysis to re-check part of (with --select-output)
    #[arg(long, requires = "select_output")]
    pub previous: Option<PathBuf>,

    /// Check only characters START:END of the previous analysis
    #[arg(long, value_name = "START:END", requires = "previous")]
    pub select_output: Option<Selection>,

    /// Output JSON only
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Easy,
    Professional,
}

impl Mode {
    pub fn profile(&self) -> ScreenProfile {
        match self {
            Mode::Easy => ScreenProfile::easy(),
            Mode::Professional => ScreenProfile::professional(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScorePolicyArg {
    Clamp,
    PassThrough,
    Reject,
}

impl From<ScorePolicyArg> for ScorePolicy {
    fn from(arg: ScorePolicyArg) -> Self {
        match arg {
            ScorePolicyArg::Clamp => ScorePolicy::Clamp,
            ScorePolicyArg::PassThrough => ScorePolicy::PassThrough,
            ScorePolicyArg::Reject => ScorePolicy::Reject,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExtractionArg {
    Greedy,
    Balanced,
}

impl From<ExtractionArg> for ExtractionMode {
    fn from(arg: ExtractionArg) -> Self {
        match arg {
            ExtractionArg::Greedy => ExtractionMode::Greedy,
            ExtractionArg::Balanced => ExtractionMode::Balanced,
        }
    }
}
