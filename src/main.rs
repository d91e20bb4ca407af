//! Learning Trainer CLI - serve the web shell and manage the local database

use clap::{Parser, Subcommand};
use learning_trainer::config;
use learning_trainer::storage::SqliteStore;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "learning-trainer")]
#[command(version = "0.1.0")]
#[command(about = "Learning Trainer - AI-powered learning agent system")]
#[command(long_about = r#"
Learning Trainer serves the Phase 1 web shell and manages the local
SQLite database behind it.

Example usage:
  learning-trainer serve --port 3000
  learning-trainer seed
  learning-trainer stats
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Database connection string (overrides DATABASE_URL and trainer.toml)
    #[arg(short, long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Populate the database with demo rows
    Seed,

    /// Show statistics about the database
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_env();
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let file_config = config::load_config(None)?;
    let database_url = config::resolve_database_url(cli.database, file_config.as_ref());

    match cli.command {
        Commands::Serve { port } => {
            let port = port
                .or_else(|| file_config.as_ref().and_then(|c| c.port))
                .unwrap_or(config::DEFAULT_PORT);
            let db_path = config::database_path_from_url(&database_url)?;
            config::ensure_db_dir(&db_path)?;

            tracing::info!("Serving {} on port {}", db_path.display(), port);
            learning_trainer::server::start_server(port, db_path).await?;
        }

        Commands::Seed => {
            let mut store = open_store(&database_url)?;
            tracing::debug!("Seeding {}", database_url);

            if let Err(e) = learning_trainer::seed::run(&mut store) {
                eprintln!("❌ Seeding failed:");
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }

        Commands::Stats => {
            let store = open_store(&database_url)?;
            let stats = store.stats()?;

            println!("📊 Learning Trainer Statistics ({})", database_url);
            println!("------------------------------------");
            println!("{}", stats);
        }
    }

    Ok(())
}

fn open_store(url: &str) -> anyhow::Result<SqliteStore> {
    if !config::is_memory_url(url) {
        config::ensure_db_dir(&config::database_path_from_url(url)?)?;
    }
    Ok(SqliteStore::open_from_url(url)?)
}
