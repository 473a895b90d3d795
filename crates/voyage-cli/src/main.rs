//! Voyage CLI - Content and booking search
//!
//! Runs content searches through the result cache and builds validated
//! hotel, tour and transport search requests.

mod api;
mod config;
mod picker;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use dialoguer::Password;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use voyage::{
    BookingForm, ContentSearchFlow, DomainError, Occupancy, QueryResultCache, SearchDomain,
    SearchOutcome,
};

use api::ContentApiClient;
use config::{mask_key, Config};
use picker::{parse_date_arg, TerminalDatePicker};

#[derive(Parser)]
#[command(name = "voyage")]
#[command(about = "Voyage CLI - Content and booking search", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search travel content once
    Search {
        /// Search query
        query: String,
        /// Sources to search (repeat or comma-separate; defaults from config)
        #[arg(short, long, value_delimiter = ',')]
        source: Vec<String>,
    },

    /// Read queries from stdin, one per line, reusing cached results
    Browse {
        /// Sources to search (defaults from config)
        #[arg(short, long, value_delimiter = ',')]
        source: Vec<String>,
    },

    /// Build a hotel search
    Hotel(BookingArgs),

    /// Build a tour search
    Tour(BookingArgs),

    /// Build a transport search
    Transport(BookingArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct BookingArgs {
    /// Destination or departure location
    #[arg(short, long)]
    location: String,
    /// Check-in / departure date (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    #[arg(long, visible_alias = "depart")]
    check_in: Option<String>,
    /// Check-out / return date
    #[arg(long, visible_alias = "return")]
    check_out: Option<String>,
    #[arg(long, default_value_t = 2)]
    adults: u8,
    #[arg(long, default_value_t = 0)]
    children: u8,
    #[arg(long, default_value_t = 1)]
    rooms: u8,
    /// Pick dates interactively
    #[arg(long)]
    pick: bool,
    /// Print the request as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the content API base URL
    SetUrl {
        url: String,
    },
    /// Store the API key (will prompt if not provided)
    SetKey {
        #[arg(short, long)]
        key: Option<String>,
    },
    /// Set default content sources (comma-separated)
    Sources {
        #[arg(value_delimiter = ',', required = true)]
        sources: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Search { query, source } => cmd_search(query, source).await,
        Commands::Browse { source } => cmd_browse(source).await,
        Commands::Hotel(args) => cmd_booking(SearchDomain::Hotel, args).await,
        Commands::Tour(args) => cmd_booking(SearchDomain::Tour, args).await,
        Commands::Transport(args) => cmd_booking(SearchDomain::Transport, args).await,
        Commands::Config { action } => cmd_config(action),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn content_flow(sources: Vec<String>) -> Result<ContentSearchFlow> {
    let config = Config::load()?.with_env();
    let sources = config.sources_or_default(sources);
    let provider = ContentApiClient::new(&config).context("Failed to build HTTP client")?;

    Ok(ContentSearchFlow::new(
        QueryResultCache::shared(SearchDomain::Content),
        Arc::new(provider),
        sources,
    ))
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_search(query: String, sources: Vec<String>) -> Result<()> {
    let flow = content_flow(sources)?;

    match flow.search(&query).await {
        Ok(outcome) => print_outcome(&query, &outcome),
        Err(DomainError::FetchFailed(message)) => bail!("Search failed: {}", message),
        Err(e) => bail!(e),
    }

    Ok(())
}

async fn cmd_browse(sources: Vec<String>) -> Result<()> {
    let flow = content_flow(sources)?;
    println!(
        "{} {}",
        "Searching".bold(),
        flow.sources().join(", ").cyan()
    );
    println!("{}", "Type a query per line, 'quit' to exit.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query == "quit" || query == "exit" {
            break;
        }

        match flow.search(query).await {
            Ok(outcome) => print_outcome(query, &outcome),
            Err(e) if e.is_retryable() => {
                println!("{} {} {}", "✗".red(), e, "(retry with the same query)".dimmed())
            }
            Err(e) => println!("{} {}", "✗".red(), e),
        }
    }

    flow.close().await;
    Ok(())
}

fn print_outcome(query: &str, outcome: &SearchOutcome) {
    let origin = match outcome {
        SearchOutcome::Cached(_) => "cached".yellow(),
        SearchOutcome::Fetched(_) => "fetched".green(),
        SearchOutcome::Superseded => {
            println!("{} '{}' was superseded", "…".dimmed(), query);
            return;
        }
    };

    let items = outcome.items();
    if items.is_empty() {
        println!("No results for '{}' ({})", query, origin);
        return;
    }

    println!("{} '{}' ({}, {} results)", "Results for".bold(), query, origin, items.len());
    for item in items {
        let source = item.source.as_deref().unwrap_or("-");
        println!(
            "  {} {} [{}] ♥ {} ▶ {}",
            item.id.dimmed(),
            item.title.cyan(),
            source,
            item.likes,
            item.views
        );
        if let Some(url) = &item.media_url {
            println!("    {}", url.dimmed());
        }
    }
}

async fn cmd_booking(domain: SearchDomain, args: BookingArgs) -> Result<()> {
    let mut form = BookingForm::new(domain)?;
    form.set_location(args.location);
    form.set_occupancy(Occupancy::new(args.adults, args.children, args.rooms)?);

    if let Some(check_in) = &args.check_in {
        form.set_start(parse_date_arg(check_in).map_err(anyhow::Error::msg)?);
    }
    if let Some(check_out) = &args.check_out {
        form.set_end(parse_date_arg(check_out).map_err(anyhow::Error::msg)?);
    }

    if args.pick {
        let (start_label, end_label) = match domain {
            SearchDomain::Transport => ("Departure", "Return"),
            _ => ("Check-in", "Check-out"),
        };
        form.pick_start(&TerminalDatePicker::new(start_label)).await;
        form.pick_end(&TerminalDatePicker::new(end_label)).await;
    }

    let search = match form.submit() {
        Ok(search) => search,
        Err(DomainError::InvalidRange { start, end }) => {
            bail!(
                "End date {} must be after start date {}",
                end.format("%Y-%m-%d %H:%M"),
                start.format("%Y-%m-%d %H:%M")
            );
        }
        Err(e) => bail!(e),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&search)?);
        return Ok(());
    }

    println!("{} {} search", "✓".green(), domain.to_string().bold());
    println!("  Location:  {}", search.location.cyan());
    println!(
        "  Dates:     {} → {} ({} nights)",
        search.dates.start.format("%Y-%m-%d %H:%M"),
        search.dates.end.format("%Y-%m-%d %H:%M"),
        search.dates.nights()
    );
    println!(
        "  Guests:    {} adults, {} children, {} rooms",
        search.occupancy.adults(),
        search.occupancy.children(),
        search.occupancy.rooms()
    );
    println!("  Query key: {}", search.query().to_string().dimmed());

    Ok(())
}

fn cmd_config(action: ConfigAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        ConfigAction::Show => {
            let effective = config.clone().with_env();
            println!("{}", "Configuration:".bold());
            println!("  Path:     {:?}", Config::config_path()?);
            println!("  Base URL: {}", effective.base_url);
            println!(
                "  API key:  {}",
                effective
                    .api_key
                    .as_deref()
                    .map(mask_key)
                    .unwrap_or_else(|| "(not set)".dimmed().to_string())
            );
            println!("  Sources:  {}", effective.default_sources.join(", "));
            println!("  Timeout:  {}s", effective.timeout_secs);
        }

        ConfigAction::SetUrl { url } => {
            config.set_base_url(url);
            config.save()?;
            println!("{} Base URL set to {}", "✓".green(), config.base_url);
        }

        ConfigAction::SetKey { key } => {
            let api_key = match key {
                Some(k) => k,
                None => Password::new()
                    .with_prompt("API Key")
                    .interact()
                    .context("Failed to read API key")?,
            };
            config.set_api_key(api_key);
            config.save()?;
            println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);
        }

        ConfigAction::Sources { sources } => {
            config.set_default_sources(sources);
            if config.default_sources.is_empty() {
                bail!("At least one source is required");
            }
            config.save()?;
            println!(
                "{} Default sources: {}",
                "✓".green(),
                config.default_sources.join(", ")
            );
        }
    }

    Ok(())
}
