//! Books service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        books::{
            errors::BooksServiceError,
            models::{Book, BookUpdate, NewBook},
            records::{BookId, BookRecord},
            repository::PgBooksRepository,
        },
        pricing::Pricing,
    },
};

/// Upper bound on the featured shelf.
pub const FEATURED_BOOKS_LIMIT: i64 = 6;

#[derive(Debug, Clone)]
pub struct PgBooksService {
    db: Db,
    repository: PgBooksRepository,
    pricing: Pricing,
}

impl PgBooksService {
    #[must_use]
    pub fn new(db: Db, pricing: Pricing) -> Self {
        Self {
            db,
            repository: PgBooksRepository::new(),
            pricing,
        }
    }

    fn books(&self, records: Vec<BookRecord>) -> Vec<Book> {
        records
            .into_iter()
            .map(|record| record.into_book(&self.pricing))
            .collect()
    }
}

#[async_trait]
impl BooksService for PgBooksService {
    async fn list_books(&self) -> Result<Vec<Book>, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self.repository.list_books(&mut tx).await?;

        tx.commit().await?;

        Ok(self.books(records))
    }

    async fn get_book(&self, book: BookId) -> Result<Book, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .get_book(&mut tx, book)
            .await?
            .ok_or_else(|| BooksServiceError::book_not_found(book))?;

        tx.commit().await?;

        Ok(record.into_book(&self.pricing))
    }

    async fn search_books(&self, query: &str) -> Result<Vec<Book>, BooksServiceError> {
        let query = query.trim();

        if query.is_empty() {
            return Err(BooksServiceError::InvalidArgument {
                field: "query",
                reason: "search query is required".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let records = self.repository.search_books(&mut tx, query).await?;

        tx.commit().await?;

        Ok(self.books(records))
    }

    async fn list_categories(&self) -> Result<Vec<String>, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn list_books_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Book>, BooksServiceError> {
        let category = category.trim();

        if category.is_empty() {
            return Err(BooksServiceError::InvalidArgument {
                field: "category",
                reason: "must not be blank".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let records = self
            .repository
            .list_books_by_category(&mut tx, category)
            .await?;

        tx.commit().await?;

        Ok(self.books(records))
    }

    async fn list_featured_books(&self) -> Result<Vec<Book>, BooksServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self
            .repository
            .list_featured_books(&mut tx, FEATURED_BOOKS_LIMIT)
            .await?;

        tx.commit().await?;

        Ok(self.books(records))
    }

    async fn create_book(&self, book: NewBook) -> Result<Book, BooksServiceError> {
        book.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_book(&mut tx, &book).await?;

        tx.commit().await?;

        Ok(created.into_book(&self.pricing))
    }

    async fn update_book(
        &self,
        book: BookId,
        update: BookUpdate,
    ) -> Result<Book, BooksServiceError> {
        update.validate()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_book(&mut tx, book, &update)
            .await?
            .ok_or_else(|| BooksServiceError::book_not_found(book))?;

        tx.commit().await?;

        Ok(updated.into_book(&self.pricing))
    }

    async fn delete_book(&self, book: BookId) -> Result<(), BooksServiceError> {
        let mut tx = self.db.begin().await?;

        if !self.repository.lock_book(&mut tx, book).await? {
            return Err(BooksServiceError::book_not_found(book));
        }

        let carts = self.repository.detach_from_carts(&mut tx, book).await?;

        let rows_affected = self.repository.delete_book(&mut tx, book).await?;

        if rows_affected == 0 {
            return Err(BooksServiceError::book_not_found(book));
        }

        tx.commit().await?;

        tracing::debug!(book = %book, carts, "deleted book");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait BooksService: Send + Sync {
    /// Retrieves every book, newest first.
    async fn list_books(&self) -> Result<Vec<Book>, BooksServiceError>;

    /// Retrieve a single book.
    async fn get_book(&self, book: BookId) -> Result<Book, BooksServiceError>;

    /// Case-insensitive substring search over title, author, publisher and category.
    async fn search_books(&self, query: &str) -> Result<Vec<Book>, BooksServiceError>;

    /// Distinct categories in use, sorted.
    async fn list_categories(&self) -> Result<Vec<String>, BooksServiceError>;

    async fn list_books_by_category(&self, category: &str)
    -> Result<Vec<Book>, BooksServiceError>;

    async fn list_featured_books(&self) -> Result<Vec<Book>, BooksServiceError>;

    async fn create_book(&self, book: NewBook) -> Result<Book, BooksServiceError>;

    /// Applies a partial update; absent fields keep their stored values.
    async fn update_book(&self, book: BookId, update: BookUpdate)
    -> Result<Book, BooksServiceError>;

    /// Deletes a book, detaching it from any carts first.
    async fn delete_book(&self, book: BookId) -> Result<(), BooksServiceError>;
}
