//! Test Helpers

use crate::domain::books::models::NewBook;

pub(crate) fn new_book(title: &str, price: u64) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: "Frank Herbert".to_string(),
        publisher: "Chilton Books".to_string(),
        price,
        image_url: None,
        pdf_url: None,
        category: None,
        featured: false,
    }
}
