use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use velobank::catalog::{self, CategoryFilter};
use velobank::export::{export_to_path, write_csv};
use velobank::Settings;

#[derive(Debug, Parser)]
#[command(name = "velobank", version, about = "VeloBank terminal banking client")]
struct Cli {
    /// JSON settings file (defaults to $VELOBANK_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive client (default)
    Tui,

    /// Write the transaction history as CSV
    Export {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only this category ("Tous" for everything)
        #[arg(short, long)]
        category: Option<CategoryFilter>,
    },

    /// Print a seed catalog as JSON
    Catalog {
        #[arg(value_enum)]
        kind: CatalogKind,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CatalogKind {
    Contacts,
    Merchants,
    Cards,
    Transactions,
    Totals,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    let command = cli.command.unwrap_or(Command::Tui);

    init_logging(&settings, matches!(command, Command::Tui))?;
    tracing::debug!(?settings, "settings loaded");

    match command {
        Command::Tui => run_ui_mode(settings)?,
        Command::Export { output, category } => run_export(output, category.unwrap_or_default())?,
        Command::Catalog { kind } => run_catalog(kind)?,
    }

    Ok(())
}

/// The TUI owns the terminal, so its logs go to a file; other commands log to stderr
fn init_logging(settings: &Settings, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .with_context(|| format!("Invalid log filter: {}", settings.log_filter))?;
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.log_file)
            .with_context(|| format!("Failed to open log file: {:?}", settings.log_file))?;

        registry
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(io::stderr)).init();
    }

    Ok(())
}

fn run_export(output: Option<PathBuf>, filter: CategoryFilter) -> Result<()> {
    let rows = catalog::filter_by_category(&catalog::list_transactions(), filter);

    match output {
        Some(path) => {
            let count = export_to_path(&path, &rows)?;
            println!("✓ Exported {} transactions ({}) to {}", count, filter, path.display());
        }
        None => {
            let count = write_csv(io::stdout().lock(), &rows)?;
            tracing::info!(rows = count, filter = %filter, "history written to stdout");
        }
    }

    Ok(())
}

fn run_catalog(kind: CatalogKind) -> Result<()> {
    let json = match kind {
        CatalogKind::Contacts => serde_json::to_string_pretty(&catalog::list_contacts())?,
        CatalogKind::Merchants => serde_json::to_string_pretty(&catalog::list_merchants())?,
        CatalogKind::Cards => serde_json::to_string_pretty(&catalog::list_cards())?,
        CatalogKind::Transactions => serde_json::to_string_pretty(&catalog::list_transactions())?,
        CatalogKind::Totals => {
            let totals: BTreeMap<&str, _> = catalog::sum_by_category(&catalog::list_transactions())
                .into_iter()
                .map(|(category, total)| (category.as_str(), total))
                .collect();
            serde_json::to_string_pretty(&totals)?
        }
    };

    println!("{}", json);
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(settings: Settings) -> Result<()> {
    tracing::info!(version = velobank::VERSION, "starting terminal client");
    velobank::ui::run_ui(settings)?;
    tracing::info!("terminal client closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_settings: Settings) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: velobank export / velobank catalog");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::parse_from(["velobank"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_export_parses_category() {
        let cli = Cli::parse_from(["velobank", "export", "--category", "revenus", "-o", "out.csv"]);
        match cli.command {
            Some(Command::Export { output, category }) => {
                assert_eq!(output, Some(PathBuf::from("out.csv")));
                assert_eq!(category, Some(CategoryFilter::Only(velobank::Category::Revenus)));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_export_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["velobank", "export", "--category", "Voyages"]).is_err());
    }
}
