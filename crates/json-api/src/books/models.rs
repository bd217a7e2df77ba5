//! Book request and response bodies.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use bookstore_app::domain::books::models::{Book, BookUpdate, NewBook};

/// Book Response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publisher: String,

    /// Price in minor currency units.
    pub price: u64,

    pub display_price: String,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub category: Option<String>,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        BookResponse {
            id: book.id.into_i64(),
            title: book.title,
            author: book.author,
            publisher: book.publisher,
            price: book.price,
            display_price: book.display_price,
            image_url: book.image_url,
            pdf_url: book.pdf_url,
            category: book.category,
            featured: book.featured,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

pub(crate) fn book_list(books: Vec<Book>) -> Vec<BookResponse> {
    books.into_iter().map(BookResponse::from).collect()
}

/// Create Book Request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub price: u64,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl From<CreateBookRequest> for NewBook {
    fn from(request: CreateBookRequest) -> Self {
        NewBook {
            title: request.title,
            author: request.author,
            publisher: request.publisher,
            price: request.price,
            image_url: request.image_url,
            pdf_url: request.pdf_url,
            category: request.category,
            featured: request.featured,
        }
    }
}

/// Update Book Request; omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub price: Option<u64>,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub category: Option<String>,
    pub featured: Option<bool>,
}

impl From<UpdateBookRequest> for BookUpdate {
    fn from(request: UpdateBookRequest) -> Self {
        BookUpdate {
            title: request.title,
            author: request.author,
            publisher: request.publisher,
            price: request.price,
            image_url: request.image_url,
            pdf_url: request.pdf_url,
            category: request.category,
            featured: request.featured,
        }
    }
}
