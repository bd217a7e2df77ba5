//! Carts Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    books::repository::{amount_to_i64, try_get_amount},
    carts::{
        models::SessionId,
        records::{CartId, CartRecord},
    },
};

const GET_CART_BY_SESSION_SQL: &str = include_str!("../sql/get_cart_by_session.sql");
const UPSERT_CART_SQL: &str = include_str!("../sql/upsert_cart.sql");
const SAVE_CART_TOTAL_SQL: &str = include_str!("../sql/save_cart_total.sql");
const DELETE_ALL_CART_ITEMS_SQL: &str = include_str!("../sql/delete_all_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// `SELECT … FOR UPDATE` on the session's cart row.
    pub(crate) async fn get_cart_by_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: &SessionId,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(GET_CART_BY_SESSION_SQL)
            .bind(session.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert the session's cart, or take the row lock on the existing one.
    pub(crate) async fn upsert_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: &SessionId,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(UPSERT_CART_SQL)
            .bind(session.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn save_cart_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        total: u64,
    ) -> Result<Timestamp, sqlx::Error> {
        let updated_at = query_scalar::<Postgres, SqlxTimestamp>(SAVE_CART_TOTAL_SQL)
            .bind(cart.into_i64())
            .bind(amount_to_i64("total", total)?)
            .fetch_one(&mut **tx)
            .await?;

        Ok(updated_at.to_jiff())
    }

    pub(crate) async fn delete_all_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ALL_CART_ITEMS_SQL)
            .bind(cart.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartId::from_i64(row.try_get("id")?),
            session_id: row.try_get("session_id")?,
            total: try_get_amount(row, "total")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
