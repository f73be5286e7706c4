// repocards: GitHub repo cards in the terminal.
// Parses the command line, wires the client, cache and session, then renders.

mod app;
mod assemble;
mod cache;
mod cards;
mod config;
mod error;
mod github;
mod logging;
mod reconcile;
mod record;
mod session;
mod ui;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::error;

use crate::app::App;
use crate::assemble::Assembler;
use crate::cache::{FileStore, RepoCache};
use crate::cards::CardAttributes;
use crate::config::{Config, parse_caching_flag};
use crate::error::{CardsError, Result};
use crate::github::GitHubClient;
use crate::reconcile::Reconciler;
use crate::session::{CardGroup, RepoCards};

#[derive(Parser)]
#[command(name = "repocards")]
#[command(about = "GitHub repository cards with a short-lived local cache")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show cards for one repo, or every repo of a user with %all
    Show {
        user: String,
        /// Repository name or %all
        repo: String,
        /// Listing order for %all: created, updated, pushed, full_name
        #[arg(long)]
        sort: Option<String>,
        /// Listing direction for %all: asc, desc
        #[arg(long)]
        direction: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show every card listed in a JSON file
    Cards {
        /// JSON array of {user, repo, sort, direction} objects
        file: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Remove cached repos: all of them, or those with exactly this name
    Clear { name: Option<String> },
}

#[derive(Args)]
struct OutputArgs {
    /// Use the local cache: true or false
    #[arg(long)]
    cache: Option<String>,
    /// Print plain text instead of opening the card browser
    #[arg(long)]
    plain: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("repocards: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Show {
            user,
            repo,
            sort,
            direction,
            output,
        } => {
            let card = CardAttributes::new(user, repo).with_sort(sort, direction);
            show(vec![card], output, cli.verbose).await
        }
        Commands::Cards { file, output } => {
            let cards: Vec<CardAttributes> = serde_json::from_str(&fs::read_to_string(file)?)?;
            show(cards, output, cli.verbose).await
        }
        Commands::Clear { name } => {
            logging::init_stderr(cli.verbose);
            let config = Config::from_env(false)?;
            let mut cards = build(&config)?;
            let removed = cards.clear_cache(name.as_deref())?;
            println!("removed {} cached repo(s)", removed);
            Ok(())
        }
    }
}

fn build(config: &Config) -> Result<RepoCards<GitHubClient, FileStore>> {
    let client = GitHubClient::new(config.token.as_deref())?;
    let cache = RepoCache::new(FileStore::new(config.entries_dir()), false);
    Ok(RepoCards::new(Reconciler::new(Assembler::new(client), cache)))
}

async fn show(cards: Vec<CardAttributes>, output: OutputArgs, verbose: bool) -> Result<()> {
    let caching = parse_caching_flag(output.cache.as_deref())?;
    let config = Config::from_env(caching)?;
    if output.plain {
        logging::init_stderr(verbose);
    } else {
        logging::init_file(&config.log_path(), verbose)?;
    }

    let mut session = build(&config)?;
    session.start(config.caching)?;

    let mut groups = Vec::new();
    let outcome = session.process(cards, &mut groups).await;

    if output.plain {
        print_plain(&groups);
        return outcome;
    }

    let error = outcome.as_ref().err().map(ToString::to_string);
    let mut terminal = ratatui::try_init()?;
    let result = App::new(groups, error).run(&mut terminal);
    ratatui::restore();
    result.map_err(CardsError::Io)?;
    outcome
}

fn print_plain(groups: &[CardGroup]) {
    for group in groups {
        println!("# {}", group.request.label());
        for card in &group.cards {
            for line in card.to_lines() {
                println!("{}", line);
            }
            println!();
        }
    }
}
