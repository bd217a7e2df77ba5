use bookstore_app::database;
use clap::Subcommand;
use sqlx::PgPool;

#[derive(Debug, Subcommand)]
pub(crate) enum DbCommand {
    /// Apply pending schema migrations
    Migrate,
}

impl DbCommand {
    pub(crate) async fn run(self, pool: &PgPool) -> Result<(), String> {
        match self {
            Self::Migrate => {
                database::migrate(pool)
                    .await
                    .map_err(|error| format!("failed to apply migrations: {error}"))?;

                println!("migrations applied");

                Ok(())
            }
        }
    }
}
