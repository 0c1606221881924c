//! searchpage CLI
//!
//! Opens the interactive search page, or runs a one-shot search and prints
//! the results.

use clap::{Args, Parser, Subcommand};
use console::style;
use searchpage::logging::{self, LogConfig};
use searchpage::{sample_items, settled_results, CategoryFilter, SearchConfig, SearchableItem};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// searchpage - search tutorials and articles from the terminal
#[derive(Parser)]
#[command(name = "searchpage")]
#[command(author = "searchpage Contributors")]
#[command(version)]
#[command(about = "Search tutorials and articles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    timing: TimingArgs,

    /// Log file (default: searchpage.log next to the executable)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args, Clone, Copy)]
struct TimingArgs {
    /// Quiet period after the last keystroke before searching, in milliseconds
    #[arg(long, default_value = "300", global = true)]
    debounce_ms: u64,

    /// Simulated search time, in milliseconds
    #[arg(long, default_value = "300", global = true)]
    latency_ms: u64,
}

impl TimingArgs {
    fn config(self) -> SearchConfig {
        SearchConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            latency: Duration::from_millis(self.latency_ms),
            ..SearchConfig::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive search page (default)
    Tui,

    /// Search the catalog and print the matching items
    Search {
        /// Text to look for in titles and bodies (use -- before it if it starts with -)
        #[arg(allow_hyphen_values = true, default_value = "")]
        query: String,

        /// Category: all, tutorial or article
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List every item in the catalog
    Items {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig {
        path: cli.log_file.clone(),
        verbose: cli.verbose,
    };
    if let Err(e) = logging::init(&log_config) {
        eprintln!("{} {}", style("Warning:").yellow().bold(), e);
    }
    info!(version = searchpage::VERSION, "searchpage starting up");

    let config = cli.timing.config();
    let result = match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => searchpage::tui::run(config),

        Commands::Search {
            query,
            category,
            json,
        } => cmd_search(config, &query, &category, json),

        Commands::Items { json } => cmd_items(json),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(if e.is_usage_error() { 2 } else { 1 });
    }
}

/// Search command implementation
fn cmd_search(
    config: SearchConfig,
    query: &str,
    category: &str,
    json: bool,
) -> searchpage::Result<()> {
    let category: CategoryFilter = category.parse()?;
    info!(query, %category, "one-shot search");

    let results = settled_results(config, query, category);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!(
        "{} Searching for '{}' in {}",
        style("→").cyan().bold(),
        style(query).yellow(),
        style(searchpage::view::selector_label(category)).yellow()
    );
    println!();

    if results.is_empty() {
        println!("{}", style(searchpage::view::EMPTY_MESSAGE).dim());
        return Ok(());
    }

    println!("Found {} results:", style(results.len()).green());
    println!();
    print_items(&results);
    Ok(())
}

/// Items command implementation
fn cmd_items(json: bool) -> searchpage::Result<()> {
    let items: Vec<&SearchableItem> = sample_items().iter().collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print_items(&items);
    }
    Ok(())
}

fn print_items(items: &[&SearchableItem]) {
    for (i, item) in items.iter().enumerate() {
        let card = searchpage::view::CardView::from_item(item);
        println!(
            "  {} {} {}",
            style(format!("{:3}.", i + 1)).dim(),
            style(&card.title).cyan().bold(),
            style(format!("[{}]", card.badge)).magenta()
        );
        println!("       {} {}", style("Date:").dim(), card.date);
        println!("       {}", card.body);
        println!();
    }
}
