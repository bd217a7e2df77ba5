//! Books Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::books::{
    models::{BookUpdate, NewBook},
    records::{BookId, BookRecord},
};

const LIST_BOOKS_SQL: &str = include_str!("sql/list_books.sql");
const GET_BOOK_SQL: &str = include_str!("sql/get_book.sql");
const FIND_BOOK_FOR_SHARE_SQL: &str = include_str!("sql/find_book_for_share.sql");
const FIND_BOOKS_BY_IDS_SQL: &str = include_str!("sql/find_books_by_ids.sql");
const SEARCH_BOOKS_SQL: &str = include_str!("sql/search_books.sql");
const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const LIST_BOOKS_BY_CATEGORY_SQL: &str = include_str!("sql/list_books_by_category.sql");
const LIST_FEATURED_BOOKS_SQL: &str = include_str!("sql/list_featured_books.sql");
const CREATE_BOOK_SQL: &str = include_str!("sql/create_book.sql");
const UPDATE_BOOK_SQL: &str = include_str!("sql/update_book.sql");
const LOCK_BOOK_SQL: &str = include_str!("sql/lock_book.sql");
const LOCK_CARTS_WITH_BOOK_SQL: &str = include_str!("sql/lock_carts_with_book.sql");
const DELETE_BOOK_CART_ITEMS_SQL: &str = include_str!("sql/delete_book_cart_items.sql");
const REFRESH_CART_TOTALS_SQL: &str = include_str!("sql/refresh_cart_totals.sql");
const DELETE_BOOK_SQL: &str = include_str!("sql/delete_book.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBooksRepository;

impl PgBooksRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<BookRecord>, sqlx::Error> {
        query_as::<Postgres, BookRecord>(LIST_BOOKS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookId,
    ) -> Result<Option<BookRecord>, sqlx::Error> {
        query_as::<Postgres, BookRecord>(GET_BOOK_SQL)
            .bind(book.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch a book and hold a key-share lock on it until the transaction ends, so the
    /// book cannot be deleted while a line item referencing it is written.
    pub(crate) async fn find_book_for_share(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookId,
    ) -> Result<Option<BookRecord>, sqlx::Error> {
        query_as::<Postgres, BookRecord>(FIND_BOOK_FOR_SHARE_SQL)
            .bind(book.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_books_by_ids(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        books: &[BookId],
    ) -> Result<Vec<BookRecord>, sqlx::Error> {
        let ids: Vec<i64> = books.iter().map(|book| book.into_i64()).collect();

        query_as::<Postgres, BookRecord>(FIND_BOOKS_BY_IDS_SQL)
            .bind(ids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn search_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        search: &str,
    ) -> Result<Vec<BookRecord>, sqlx::Error> {
        query_as::<Postgres, BookRecord>(SEARCH_BOOKS_SQL)
            .bind(contains_pattern(search))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<String>, sqlx::Error> {
        query_scalar::<Postgres, String>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_books_by_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &str,
    ) -> Result<Vec<BookRecord>, sqlx::Error> {
        query_as::<Postgres, BookRecord>(LIST_BOOKS_BY_CATEGORY_SQL)
            .bind(category)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_featured_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
    ) -> Result<Vec<BookRecord>, sqlx::Error> {
        query_as::<Postgres, BookRecord>(LIST_FEATURED_BOOKS_SQL)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: &NewBook,
    ) -> Result<BookRecord, sqlx::Error> {
        query_as::<Postgres, BookRecord>(CREATE_BOOK_SQL)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.publisher)
            .bind(amount_to_i64("price", book.price)?)
            .bind(&book.image_url)
            .bind(&book.pdf_url)
            .bind(&book.category)
            .bind(book.featured)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookId,
        update: &BookUpdate,
    ) -> Result<Option<BookRecord>, sqlx::Error> {
        let price = update
            .price
            .map(|price| amount_to_i64("price", price))
            .transpose()?;

        query_as::<Postgres, BookRecord>(UPDATE_BOOK_SQL)
            .bind(book.into_i64())
            .bind(&update.title)
            .bind(&update.author)
            .bind(&update.publisher)
            .bind(price)
            .bind(&update.image_url)
            .bind(&update.pdf_url)
            .bind(&update.category)
            .bind(update.featured)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn lock_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookId,
    ) -> Result<bool, sqlx::Error> {
        let locked = query_scalar::<Postgres, i64>(LOCK_BOOK_SQL)
            .bind(book.into_i64())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(locked.is_some())
    }

    /// Remove a book from every cart holding it and recompute those carts' totals.
    ///
    /// Returns the number of carts touched.
    pub(crate) async fn detach_from_carts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookId,
    ) -> Result<usize, sqlx::Error> {
        let carts = query_scalar::<Postgres, i64>(LOCK_CARTS_WITH_BOOK_SQL)
            .bind(book.into_i64())
            .fetch_all(&mut **tx)
            .await?;

        if carts.is_empty() {
            return Ok(0);
        }

        query(DELETE_BOOK_CART_ITEMS_SQL)
            .bind(book.into_i64())
            .execute(&mut **tx)
            .await?;

        query(REFRESH_CART_TOTALS_SQL)
            .bind(&carts)
            .execute(&mut **tx)
            .await?;

        Ok(carts.len())
    }

    pub(crate) async fn delete_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_BOOK_SQL)
            .bind(book.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for BookRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: BookId::from_i64(row.try_get("id")?),
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            publisher: row.try_get("publisher")?,
            price: try_get_amount(row, "price")?,
            image_url: row.try_get("image_url")?,
            pdf_url: row.try_get("pdf_url")?,
            category: row.try_get("category")?,
            featured: row.try_get("featured")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

/// Read a non-negative `BIGINT` amount column.
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Convert an amount for binding into a `BIGINT` column.
pub(crate) fn amount_to_i64(col: &str, amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::Encode(format!("{col}: {e}").into()))
}

fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);

    pattern.push('%');

    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(c);
    }

    pattern.push('%');

    pattern
}
