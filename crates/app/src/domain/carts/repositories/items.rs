//! Cart Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    books::{
        records::BookId,
        repository::{amount_to_i64, try_get_amount},
    },
    carts::{
        models::CartItem,
        records::{CartId, CartItemRecord},
    },
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(cart.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// Writes the line's quantity. An existing line keeps its `price_at_addition`.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        item: &CartItem,
    ) -> Result<(), sqlx::Error> {
        let quantity = i32::try_from(item.quantity)
            .map_err(|e| sqlx::Error::Encode(format!("quantity: {e}").into()))?;

        query(UPSERT_CART_ITEM_SQL)
            .bind(cart.into_i64())
            .bind(item.book.id.into_i64())
            .bind(quantity)
            .bind(amount_to_i64("price_at_addition", item.price_at_addition)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        book: BookId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(cart.into_i64())
            .bind(book.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity")?;

        Ok(Self {
            book_id: BookId::from_i64(row.try_get("book_id")?),
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            publisher: row.try_get("publisher")?,
            image_url: row.try_get("image_url")?,
            quantity: u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?,
            price_at_addition: try_get_amount(row, "price_at_addition")?,
        })
    }
}
