//! Book Models

use jiff::Timestamp;

use crate::domain::books::{errors::BooksServiceError, records::BookId};

/// Book Model
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub publisher: String,

    /// Unit price in minor currency units.
    pub price: u64,

    /// Unit price formatted in the store currency.
    pub display_price: String,

    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub category: Option<String>,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Book Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub price: u64,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub category: Option<String>,
    pub featured: bool,
}

impl NewBook {
    pub(crate) fn validate(&self) -> Result<(), BooksServiceError> {
        require_text("title", &self.title)?;
        require_text("author", &self.author)?;
        require_text("publisher", &self.publisher)
    }
}

/// Partial book update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub price: Option<u64>,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub category: Option<String>,
    pub featured: Option<bool>,
}

impl BookUpdate {
    pub(crate) fn validate(&self) -> Result<(), BooksServiceError> {
        for (field, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("publisher", &self.publisher),
        ] {
            if let Some(value) = value {
                require_text(field, value)?;
            }
        }

        Ok(())
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), BooksServiceError> {
    if value.trim().is_empty() {
        return Err(BooksServiceError::InvalidArgument {
            field,
            reason: "must not be blank".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book() -> NewBook {
        NewBook {
            title: "Linear Algebra and Its Applications".to_string(),
            author: "David C. Lay".to_string(),
            publisher: "Pearson".to_string(),
            price: 640,
            image_url: None,
            pdf_url: None,
            category: Some("Education".to_string()),
            featured: false,
        }
    }

    #[test]
    fn new_book_with_all_text_fields_is_valid() {
        assert!(new_book().validate().is_ok(), "complete book should validate");
    }

    #[test]
    fn new_book_with_blank_author_is_rejected() {
        let book = NewBook {
            author: "   ".to_string(),
            ..new_book()
        };

        let result = book.validate();

        assert!(
            matches!(
                result,
                Err(BooksServiceError::InvalidArgument { field: "author", .. })
            ),
            "expected InvalidArgument for author, got {result:?}"
        );
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(BookUpdate::default().validate().is_ok(), "no-op update should validate");
    }

    #[test]
    fn update_with_blank_title_is_rejected() {
        let update = BookUpdate {
            title: Some(String::new()),
            ..BookUpdate::default()
        };

        assert!(
            matches!(
                update.validate(),
                Err(BooksServiceError::InvalidArgument { field: "title", .. })
            ),
            "blank title should be rejected"
        );
    }
}
