//! Per-test Postgres databases inside one shared container.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};
use uuid::Uuid;

const USER: &str = "bookstore_test";
const PASSWORD: &str = "bookstore_test_password";

static CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

/// Names of databases waiting to be dropped by the janitor task.
static JANITOR: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

async fn start_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name(USER)
        .start()
        .await
        .expect("postgres container should start")
}

async fn start_janitor() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if let Ok(mut conn) = PgConnection::connect(&server_url("postgres").await).await {
                let _dropped = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{name}\""))
                    .execute(&mut conn)
                    .await;
                let _closed = conn.close().await;
            }
        }
    });

    sender
}

async fn server_url(database: &str) -> String {
    let container = CONTAINER.get_or_init(start_container).await;

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("postgres port should be mapped");

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_owned());

    format!("postgresql://{USER}:{PASSWORD}@{host}:{port}/{database}")
}

/// A freshly migrated database owned by one test.
///
/// Services commit normally, so isolation comes from the database itself rather
/// than from rollback. The database is dropped in the background once this value
/// goes away.
#[derive(Debug)]
pub(crate) struct TestDb {
    pool: PgPool,
    name: String,
}

impl TestDb {
    pub(crate) async fn new() -> Self {
        JANITOR.get_or_init(start_janitor).await;

        // Generated from a UUID, so safe to splice into DDL.
        let name = format!("bookstore_{}", Uuid::now_v7().simple());

        let mut admin = PgConnection::connect(&server_url("postgres").await)
            .await
            .expect("admin connection should open");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut admin)
            .await
            .expect("test database should be created");

        admin.close().await.expect("admin connection should close");

        let pool = PgPool::connect(&server_url(&name).await)
            .await
            .expect("test database pool should open");

        crate::database::migrate(&pool)
            .await
            .expect("migrations should apply");

        Self { pool, name }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(janitor) = JANITOR.get() {
            let _queued = janitor.send(self.name.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn migrated_schema_is_present() -> TestResult {
        let test_db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_name IN ('books', 'carts', 'cart_items', 'orders', 'order_items', 'api_tokens')",
        )
        .fetch_one(test_db.pool())
        .await?;

        assert_eq!(tables, 6);

        Ok(())
    }

    #[tokio::test]
    async fn each_test_gets_its_own_database() -> TestResult {
        let first = TestDb::new().await;
        let second = TestDb::new().await;

        sqlx::query("CREATE TABLE scratch (id INTEGER)")
            .execute(first.pool())
            .await?;

        let seen = sqlx::query("SELECT 1 FROM scratch")
            .fetch_optional(second.pool())
            .await;

        assert!(seen.is_err(), "scratch table leaked across databases");

        Ok(())
    }
}
