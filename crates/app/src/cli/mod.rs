//! `bookstore-app` command line.

use bookstore_app::{auth::PgAuthService, database};
use clap::{Parser, Subcommand};

mod db;
mod token;

/// The CLI only ever needs a single connection.
const CLI_MAX_CONNECTIONS: u32 = 1;

#[derive(Debug, Parser)]
#[command(name = "bookstore-app", about = "Bookstore CLI", long_about = None)]
pub(crate) struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Issue, list and revoke API tokens
    #[command(subcommand)]
    Token(token::TokenCommand),

    /// Schema maintenance
    #[command(subcommand)]
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let pool = database::connect(&self.database_url, CLI_MAX_CONNECTIONS)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        match self.command {
            Commands::Token(command) => command.run(&PgAuthService::new(pool)).await,
            Commands::Db(command) => command.run(&pool).await,
        }
    }
}
