//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        books::{records::BookId, repository::PgBooksRepository},
        carts::{
            errors::CartsServiceError,
            ledger,
            models::{Cart, SessionId},
            repositories::{PgCartItemsRepository, PgCartStore, PgCartsRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    books_repository: PgBooksRepository,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            books_repository: PgBooksRepository::new(),
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }

    fn store<'a>(&'a self, tx: &'a mut Transaction<'static, Postgres>) -> PgCartStore<'a> {
        PgCartStore::new(
            tx,
            &self.books_repository,
            &self.carts_repository,
            &self.items_repository,
        )
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, session: &SessionId) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = ledger::get_cart(&mut self.store(&mut tx), session).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn add_item(
        &self,
        session: &SessionId,
        book: BookId,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = ledger::add_item(&mut self.store(&mut tx), session, book, quantity).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn update_item_quantity(
        &self,
        session: &SessionId,
        book: BookId,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart =
            ledger::update_item_quantity(&mut self.store(&mut tx), session, book, quantity)
                .await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(
        &self,
        session: &SessionId,
        book: BookId,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = ledger::remove_item(&mut self.store(&mut tx), session, book).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart(&self, session: &SessionId) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = ledger::clear_cart(&mut self.store(&mut tx), session).await?;

        tx.commit().await?;

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the session's cart, or an empty cart if it has none.
    async fn get_cart(&self, session: &SessionId) -> Result<Cart, CartsServiceError>;

    /// Add `quantity` (at least 1) of a book, creating the cart on first use.
    async fn add_item(
        &self,
        session: &SessionId,
        book: BookId,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError>;

    /// Set a line's quantity; zero removes it and negatives are rejected.
    async fn update_item_quantity(
        &self,
        session: &SessionId,
        book: BookId,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError>;

    async fn remove_item(&self, session: &SessionId, book: BookId)
    -> Result<Cart, CartsServiceError>;

    /// Remove every line and zero the total.
    async fn clear_cart(&self, session: &SessionId) -> Result<Cart, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::{
        domain::{Entity, books::BooksService, books::models::BookUpdate},
        test::{TestContext, helpers::new_book},
    };

    use super::*;

    fn session(value: &str) -> SessionId {
        SessionId::parse(value).expect("valid session id")
    }

    #[tokio::test]
    async fn add_then_update_then_remove_persists_totals() -> TestResult {
        let ctx = TestContext::new().await;
        let book = ctx.books.create_book(new_book("Dune", 300)).await?;
        let s1 = session("s1");

        let cart = ctx.carts.add_item(&s1, book.id, 2).await?;
        assert_eq!(cart.total, 600);

        let cart = ctx.carts.add_item(&s1, book.id, 1).await?;
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.total, 900);

        let cart = ctx.carts.update_item_quantity(&s1, book.id, 1).await?;
        assert_eq!(cart.total, 300);

        let cart = ctx.carts.remove_item(&s1, book.id).await?;
        assert!(cart.items.is_empty());
        assert_eq!(cart.total, 0);

        let reread = ctx.carts.get_cart(&s1).await?;
        assert_eq!(reread.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn price_changes_do_not_reprice_existing_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let book = ctx.books.create_book(new_book("Dune", 500)).await?;
        let s = session("price-lock");

        ctx.carts.add_item(&s, book.id, 1).await?;
        ctx.books
            .update_book(
                book.id,
                BookUpdate {
                    price: Some(700),
                    ..BookUpdate::default()
                },
            )
            .await?;
        let cart = ctx.carts.add_item(&s, book.id, 1).await?;

        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.items[0].price_at_addition, 500);
        assert_eq!(cart.total, 1000);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_session_is_an_empty_cart() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = ctx.carts.get_cart(&session("unknown")).await?;

        assert!(cart.items.is_empty());
        assert_eq!(cart.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn adding_a_missing_book_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .add_item(&session("s"), BookId::from_i64(999), 1)
            .await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::NotFound {
                    entity: Entity::Book,
                    ..
                })
            ),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn concurrent_adds_to_one_session_are_serialized() -> TestResult {
        let ctx = TestContext::new().await;
        let book = ctx.books.create_book(new_book("Dune", 100)).await?;
        let carts = Arc::new(PgCartsService::new(ctx.db()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let carts = Arc::clone(&carts);
                let book = book.id;

                tokio::spawn(async move { carts.add_item(&session("double"), book, 1).await })
            })
            .collect();

        for handle in handles {
            handle.await??;
        }

        let cart = ctx.carts.get_cart(&session("double")).await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 8);
        assert_eq!(cart.total, 800);

        Ok(())
    }

    #[tokio::test]
    async fn deleting_a_book_refreshes_cart_totals() -> TestResult {
        let ctx = TestContext::new().await;
        let kept = ctx.books.create_book(new_book("Kept", 200)).await?;
        let dropped = ctx.books.create_book(new_book("Dropped", 500)).await?;
        let s = session("s");

        ctx.carts.add_item(&s, kept.id, 1).await?;
        ctx.carts.add_item(&s, dropped.id, 2).await?;

        ctx.books.delete_book(dropped.id).await?;
        let cart = ctx.carts.get_cart(&s).await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total, 200);

        Ok(())
    }
}
