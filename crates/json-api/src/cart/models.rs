//! Cart request and response bodies.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use bookstore_app::domain::carts::models::{Cart, CartBook, CartItem};

/// Cart Response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    pub session_id: String,
    pub items: Vec<CartItemResponse>,

    /// Sum of `priceAtAddition * quantity` in minor currency units.
    pub total: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub book: CartBookResponse,
    pub quantity: u32,
    pub price_at_addition: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartBookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub image_url: Option<String>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartResponse {
            session_id: cart.session_id.to_string(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            total: cart.total,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        CartItemResponse {
            book: item.book.into(),
            quantity: item.quantity,
            price_at_addition: item.price_at_addition,
        }
    }
}

impl From<CartBook> for CartBookResponse {
    fn from(book: CartBook) -> Self {
        CartBookResponse {
            id: book.id.into_i64(),
            title: book.title,
            author: book.author,
            publisher: book.publisher,
            image_url: book.image_url,
        }
    }
}

fn default_quantity() -> i64 {
    1
}

/// Add Cart Item Request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCartItemRequest {
    pub book_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

/// Update Cart Item Request; `0` removes the line.
#[derive(Debug, Deserialize)]
pub(crate) struct UpdateCartItemRequest {
    pub quantity: i64,
}
