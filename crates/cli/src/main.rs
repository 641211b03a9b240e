//! `jobly` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — start the API server.
//! - `migrate` — run pending database migrations.
//!
//! Every flag can also be supplied through the environment variable named in
//! its help text.  Log verbosity follows `RUST_LOG` (default `info`).

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jobly", about = "Companies and jobs REST API", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct DatabaseArgs {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    max_connections: u32,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, env = "JOBLY_BIND", default_value = "0.0.0.0:3001")]
        bind: String,

        /// Key that bearer tokens are signed with.
        #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
        secret_key: String,

        #[command(flatten)]
        database: DatabaseArgs,
    },
    /// Run pending database migrations.
    Migrate {
        #[command(flatten)]
        database: DatabaseArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            bind,
            secret_key,
            database,
        } => {
            info!("Starting API server on {bind}");
            let pool = db::pool::create_lazy_pool(&database.database_url, database.max_connections)
                .context("invalid database configuration")?;
            api::serve(&bind, api::AppState::new(pool, secret_key))
                .await
                .context("server failed")?;
        }
        Command::Migrate { database } => {
            let pool = db::pool::create_pool(&database.database_url, database.max_connections.min(2))
                .await
                .context("failed to connect to database")?;
            db::pool::run_migrations(&pool)
                .await
                .context("migration failed")?;
            info!("Migrations applied successfully");
        }
    }

    Ok(())
}
