//! FactCheck Control - terminal front end for fact checking
//!
//! Sends text to the configured chat-completion endpoint and renders the
//! score badge and analysis.

use anyhow::Result;
use clap::Parser;
use factcheckctl::cli::{Cli, Commands};
use factcheckctl::{commands, logging};
use std::io::{IsTerminal, Write};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let color = !cli.no_color
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();

    let code = match cli.command {
        Commands::Check(args) => commands::check(args, color).await?,
        Commands::Interpret {
            file,
            score_policy,
            extraction,
            json,
        } => commands::interpret(file, score_policy, extraction, json, color)?,
        Commands::Rate { score, json } => commands::rate_score(score, json, color)?,
        Commands::Models => commands::models()?,
        Commands::Config { init } => commands::config(init)?,
    };

    std::io::stdout().flush()?;
    std::process::exit(code);
}
