//! Transaction-scoped cart store

use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::{Postgres, Transaction};

use crate::domain::{
    books::{
        records::{BookId, BookRecord},
        repository::PgBooksRepository,
    },
    carts::{
        ledger::{CartStore, LockedCart},
        models::{CartItem, SessionId},
        records::{CartId, CartRecord},
    },
};

use super::{PgCartItemsRepository, PgCartsRepository};

/// [`CartStore`] backed by one open Postgres transaction.
pub(crate) struct PgCartStore<'a> {
    tx: &'a mut Transaction<'static, Postgres>,
    books: &'a PgBooksRepository,
    carts: &'a PgCartsRepository,
    items: &'a PgCartItemsRepository,
}

impl<'a> PgCartStore<'a> {
    pub(crate) fn new(
        tx: &'a mut Transaction<'static, Postgres>,
        books: &'a PgBooksRepository,
        carts: &'a PgCartsRepository,
        items: &'a PgCartItemsRepository,
    ) -> Self {
        Self {
            tx,
            books,
            carts,
            items,
        }
    }

    async fn with_items(
        &mut self,
        session: &SessionId,
        record: CartRecord,
    ) -> Result<LockedCart, sqlx::Error> {
        let id = record.id;
        let items = self.items.get_cart_items(self.tx, id).await?;

        Ok(LockedCart {
            id,
            cart: record.into_cart(session.clone(), items),
        })
    }
}

#[async_trait]
impl CartStore for PgCartStore<'_> {
    async fn find_book_by_id(&mut self, book: BookId) -> Result<Option<BookRecord>, sqlx::Error> {
        self.books.find_book_for_share(self.tx, book).await
    }

    async fn get_cart_by_session(
        &mut self,
        session: &SessionId,
    ) -> Result<Option<LockedCart>, sqlx::Error> {
        match self.carts.get_cart_by_session(self.tx, session).await? {
            Some(record) => self.with_items(session, record).await.map(Some),
            None => Ok(None),
        }
    }

    async fn upsert_cart(&mut self, session: &SessionId) -> Result<LockedCart, sqlx::Error> {
        let record = self.carts.upsert_cart(self.tx, session).await?;

        self.with_items(session, record).await
    }

    async fn save_cart_total(
        &mut self,
        cart: CartId,
        total: u64,
    ) -> Result<Timestamp, sqlx::Error> {
        self.carts.save_cart_total(self.tx, cart, total).await
    }

    async fn upsert_cart_item(
        &mut self,
        cart: CartId,
        item: &CartItem,
    ) -> Result<(), sqlx::Error> {
        self.items.upsert_cart_item(self.tx, cart, item).await
    }

    async fn delete_cart_item(&mut self, cart: CartId, book: BookId) -> Result<u64, sqlx::Error> {
        self.items.delete_cart_item(self.tx, cart, book).await
    }

    async fn delete_all_cart_items(&mut self, cart: CartId) -> Result<u64, sqlx::Error> {
        self.carts.delete_all_cart_items(self.tx, cart).await
    }
}
