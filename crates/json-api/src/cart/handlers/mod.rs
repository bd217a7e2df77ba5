//! Cart Handlers

use salvo::prelude::Request;

use bookstore_app::domain::carts::models::SessionId;

use crate::{cart::errors::into_api_error, envelope::ApiError, extensions::*};

pub(crate) mod add;
pub(crate) mod clear;
pub(crate) mod get;
pub(crate) mod remove;
pub(crate) mod update;

fn session_param(req: &Request) -> Result<SessionId, ApiError> {
    SessionId::parse(&req.text_param("session")?).map_err(into_api_error)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use bookstore_app::domain::{
        books::records::BookId,
        carts::{
            CartsServiceError,
            models::{Cart, CartBook, CartItem, SessionId},
        },
    };

    pub(super) fn make_cart(
        session_id: &str,
        lines: &[(i64, u32, u64)],
    ) -> Result<Cart, CartsServiceError> {
        let items: Vec<CartItem> = lines
            .iter()
            .map(|&(book, quantity, price)| CartItem {
                book: CartBook {
                    id: BookId::from_i64(book),
                    title: format!("Book {book}"),
                    author: "Jane Austen".to_string(),
                    publisher: "Penguin".to_string(),
                    image_url: None,
                },
                quantity,
                price_at_addition: price,
            })
            .collect();

        Ok(Cart {
            session_id: SessionId::parse(session_id)?,
            total: items
                .iter()
                .map(|item| item.price_at_addition * u64::from(item.quantity))
                .sum(),
            items,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        })
    }
}
