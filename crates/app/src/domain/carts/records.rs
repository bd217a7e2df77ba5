//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{
        books::records::BookId,
        carts::models::{Cart, CartBook, CartItem, SessionId},
    },
    ids::TypedId,
};

/// Cart Id
pub type CartId = TypedId<CartRecord>;

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub id: CartId,
    pub session_id: String,
    pub total: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart item row joined with its book.
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub image_url: Option<String>,
    pub quantity: u32,
    pub price_at_addition: u64,
}

impl CartRecord {
    pub(crate) fn into_cart(self, session_id: SessionId, items: Vec<CartItemRecord>) -> Cart {
        Cart {
            session_id,
            items: items.into_iter().map(CartItemRecord::into_item).collect(),
            total: self.total,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl CartItemRecord {
    fn into_item(self) -> CartItem {
        CartItem {
            book: CartBook {
                id: self.book_id,
                title: self.title,
                author: self.author,
                publisher: self.publisher,
                image_url: self.image_url,
            },
            quantity: self.quantity,
            price_at_addition: self.price_at_addition,
        }
    }
}
