//! Book Records

use jiff::Timestamp;

use crate::{
    domain::{books::models::Book, pricing::Pricing},
    ids::TypedId,
};

/// Book Id
pub type BookId = TypedId<BookRecord>;

/// Book Record
#[derive(Debug, Clone)]
pub struct BookRecord {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub price: u64,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub category: Option<String>,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BookRecord {
    #[must_use]
    pub fn into_book(self, pricing: &Pricing) -> Book {
        Book {
            display_price: pricing.display(self.price),
            id: self.id,
            title: self.title,
            author: self.author,
            publisher: self.publisher,
            price: self.price,
            image_url: self.image_url,
            pdf_url: self.pdf_url,
            category: self.category,
            featured: self.featured,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
