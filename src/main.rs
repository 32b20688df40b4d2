use anyhow::{Context, Result};
use bibsearch::index::stats::write_stats;
use bibsearch::output::{self, write_json, write_results, write_suggestions};
use bibsearch::utils::{AppConfig, Spinner};
use bibsearch::{AccessType, Operator, SearchEngine, SearchQuery, interactive};
use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bibsearch", version)]
#[command(about = "Full-text and faceted search over a bibliographic paper archive")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Search query (when no subcommand is given)
    query: Vec<String>,

    /// Archive directory containing metadata/download_sources.json
    #[arg(short = 'd', long, default_value = ".", global = true)]
    archive_dir: PathBuf,

    /// Corpus file to load instead of the archive metadata
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Author name to search for
    #[arg(short, long)]
    author: Option<String>,

    /// Start year for date range (inclusive)
    #[arg(long)]
    start_year: Option<i32>,

    /// End year for date range (inclusive)
    #[arg(long)]
    end_year: Option<i32>,

    /// Filter by category (can be used multiple times)
    #[arg(short, long)]
    category: Vec<String>,

    /// Filter by access type: OA, AP, PD, IR or AR (can be used multiple times)
    #[arg(long)]
    access_type: Vec<AccessType>,

    /// Maximum number of results to show
    #[arg(short = 'n', long)]
    max_results: Option<usize>,

    /// Require all query words (and) or any of them (or)
    #[arg(long, default_value = "and")]
    operator: Operator,

    /// Show relevance scores
    #[arg(long)]
    show_scores: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Configuration file (defaults to <config dir>/bibsearch/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress logging and the loading spinner
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest words, authors, categories and access types for a partial query
    Suggest {
        /// Partial query text
        partial: String,
    },
    /// Show index statistics
    Stats,
    /// Interactive search mode
    Interactive,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let engine = open_engine(cli, config)?;

    match &cli.command {
        Some(Commands::Suggest { partial }) => {
            let suggestions = engine.suggest(partial);
            if cli.json {
                write_json(&mut io::stdout().lock(), &suggestions)?;
            } else {
                write_suggestions(&mut output::stdout(true), &suggestions)?;
            }
        }
        Some(Commands::Stats) => {
            let stats = engine.stats();
            if cli.json {
                write_json(&mut io::stdout().lock(), &stats)?;
            } else {
                write_stats(&mut io::stdout().lock(), &stats)?;
            }
        }
        Some(Commands::Interactive) => {
            interactive::run(&engine, true)?;
        }
        None => {
            let query = build_query(cli, engine.config());
            debug!(?query, "command line query");
            let results = engine.search(&query);
            if cli.json {
                write_json(&mut io::stdout().lock(), &results)?;
            } else {
                let mut stdout = output::stdout(true);
                write_results(&mut stdout, &results, cli.show_scores)?;
                stdout.flush()?;
            }
        }
    }

    Ok(())
}

fn open_engine(cli: &Cli, config: AppConfig) -> Result<SearchEngine> {
    let show_spinner = !cli.quiet && io::stderr().is_terminal();
    let _spinner = Spinner::start("Loading archive...", show_spinner);

    match &cli.corpus {
        Some(path) => SearchEngine::open_file(path, config)
            .with_context(|| format!("Failed to load corpus {}", path.display())),
        None => SearchEngine::open_archive(&cli.archive_dir, config).with_context(|| {
            format!("Failed to load archive at {}", cli.archive_dir.display())
        }),
    }
}

fn build_query(cli: &Cli, config: &AppConfig) -> SearchQuery {
    let mut query = SearchQuery::text(cli.query.join(" "))
        .with_operator(cli.operator)
        .with_years(cli.start_year, cli.end_year)
        .with_limit(cli.max_results.unwrap_or(config.max_results));

    if let Some(author) = &cli.author {
        query = query.with_author(author.clone());
    }
    for category in &cli.category {
        query = query.with_category(category.clone());
    }
    for &access in &cli.access_type {
        query = query.with_access_type(access);
    }

    query
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,bibsearch=info",
        1 => "info,bibsearch=debug",
        2 => "debug,bibsearch=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(io::stderr))
            .init();
    }
}
