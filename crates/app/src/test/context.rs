//! Test context for service-level integration tests.

use crate::{
    auth::PgAuthService,
    database::Db,
    domain::{
        books::PgBooksService, carts::PgCartsService, orders::PgOrdersService, pricing::Pricing,
    },
};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub test_db: TestDb,
    pub books: PgBooksService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
    pub auth: PgAuthService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());
        let pricing = Pricing::default();

        Self {
            books: PgBooksService::new(db.clone(), pricing),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db, pricing),
            auth: PgAuthService::new(test_db.pool().clone()),
            test_db,
        }
    }

    /// A fresh handle on this context's database, for building extra service instances.
    pub(crate) fn db(&self) -> Db {
        Db::new(self.test_db.pool().clone())
    }
}
