//! valuables - Track personal valuables from the command line

mod cli;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use valuables_core::repository::keys;
use valuables_core::store::default_data_dir;
use valuables_core::{
    InsertOutcome, InventorySummary, ItemForm, KeyValueStore, MemoryStore, PhotoSelection,
    RepositoryConfig, SqliteStore, ValuablesRepository, ValueLimits,
};

type Repo = ValuablesRepository<Arc<dyn KeyValueStore>>;

#[derive(Parser)]
#[command(
    name = "valuables",
    version,
    about = "Track personal valuables and their total value",
    long_about = concat!(
        "Keeps a list of your valuables (name, value, description, photo) on this\n",
        "device and shows the running total against your €40,000 limit.\n",
        "\n",
        "Examples:\n",
        "  valuables list                                   # Show the inventory\n",
        "  valuables add --name Ring --value 700 --photo ~/ring.jpg\n",
        "  valuables remove Ring                            # Delete by name\n",
        "  valuables total                                  # Total and remaining limit\n",
        "\n",
        "Environment Variables:\n",
        "  VALUABLES_HOME                   # Override data directory\n",
        "  VALUABLES_NO_COLOR               # Disable ANSI colors\n",
        "  RUST_LOG                         # Log filter (default: warn)",
    )
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Data directory (default: platform data dir + /valuables)
    #[arg(long, env = "VALUABLES_HOME")]
    data_dir: Option<PathBuf>,

    /// Store key holding the list
    #[arg(long, default_value = keys::VALUABLES)]
    key: String,

    /// Use a throwaway in-memory store
    #[arg(long)]
    memory: bool,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "VALUABLES_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show stored valuables, newest first (default)
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a valuable
    Add {
        /// Item name (must be unique)
        #[arg(long)]
        name: String,
        /// Purchase price in euros
        #[arg(long)]
        value: String,
        /// Photo URI or path
        #[arg(long)]
        photo: Option<String>,
        /// Optional description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Remove every valuable with this name
    Remove {
        name: String,
    },
    /// Print the total value and the remaining allowance
    Total {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove all stored valuables
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.no_color);

    let repo = open_repository(&cli)?;
    let mut events = repo.event_bus().subscribe();

    match cli.command.unwrap_or(Command::List { json: false }) {
        Command::List { json } => run_list(&repo, json, cli.no_color).await?,
        Command::Add {
            name,
            value,
            photo,
            description,
        } => run_add(&repo, name, value, photo, description).await?,
        Command::Remove { name } => run_remove(&repo, &name).await?,
        Command::Total { json } => run_total(&repo, json).await?,
        Command::Clear => run_clear(&repo).await?,
    }

    while let Ok(event) = events.try_recv() {
        debug!(?event, "Inventory changed");
    }

    Ok(())
}

fn init_tracing(no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .try_init();
}

fn open_repository(cli: &Cli) -> Result<Repo> {
    let store: Arc<dyn KeyValueStore> = if cli.memory {
        Arc::new(MemoryStore::new())
    } else {
        let data_dir = cli
            .data_dir
            .clone()
            .or_else(default_data_dir)
            .context("Could not determine data directory")?;
        Arc::new(SqliteStore::open(&data_dir).context("Failed to open valuables store")?)
    };

    let config = RepositoryConfig {
        key: cli.key.clone(),
        limits: ValueLimits::default(),
    };

    Ok(ValuablesRepository::new(store, config))
}

// ============================================================================
// Command Handlers
// ============================================================================

async fn run_list(repo: &Repo, json: bool, no_color: bool) -> Result<()> {
    let items = repo.list().await.context("Failed to read valuables")?;
    let summary = InventorySummary::from_items(&items, *repo.limits());

    println!("{}", cli::format_item_table(&items, json, no_color));
    if !json && !summary.is_empty() {
        println!();
        println!("{}", cli::format_summary(&summary));
    }

    Ok(())
}

async fn run_add(
    repo: &Repo,
    name: String,
    value: String,
    photo: Option<String>,
    description: String,
) -> Result<()> {
    let summary = repo.summary().await.context("Failed to read valuables")?;

    let mut form = ItemForm::with_limits(summary.total_value, *repo.limits());
    match photo {
        Some(uri) => form.pick_photo(Some(PhotoSelection::picked(uri))),
        None => form.remove_photo(),
    }
    form.set_name(name);
    form.set_value(value);
    form.set_description(description);

    if !form.can_submit() {
        eprintln!("{}", cli::format_form_errors(form.errors()));
        bail!("Valuable not added");
    }

    match form.submit(repo).await.context("Failed to store valuable")? {
        InsertOutcome::Inserted(item) => {
            println!(
                "Added {} (#{}) for €{}",
                item.name,
                item.id.unwrap_or_default(),
                valuables_core::format_price(item.purchase_price)
            );
        }
        outcome @ InsertOutcome::Duplicate { .. } => {
            eprintln!("{}: an item with this name already exists", outcome);
        }
    }

    Ok(())
}

async fn run_remove(repo: &Repo, name: &str) -> Result<()> {
    let outcome = repo
        .delete(name)
        .await
        .context("Failed to remove valuable")?;

    match outcome.removed {
        0 => println!("No valuable named '{}'", name),
        1 => println!("Removed '{}'", name),
        n => println!("Removed {} valuables named '{}'", n, name),
    }

    Ok(())
}

async fn run_total(repo: &Repo, json: bool) -> Result<()> {
    let summary = repo.summary().await.context("Failed to read valuables")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to encode summary")?
        );
    } else {
        println!("{}", cli::format_summary(&summary));
    }

    Ok(())
}

async fn run_clear(repo: &Repo) -> Result<()> {
    repo.clear().await.context("Failed to clear valuables")?;
    println!("All valuables removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_long_about_keeps_example_indent() {
        let cmd = Cli::command();
        let about = cmd
            .get_long_about()
            .map(|text| text.to_string())
            .unwrap_or_default();

        assert!(about.contains("\n  valuables list "));
        assert!(about.contains("\n  RUST_LOG "));
    }
}
