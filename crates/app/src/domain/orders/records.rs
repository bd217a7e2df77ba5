//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{
        books::records::BookId,
        orders::models::{OrderItem, OrderStatus},
    },
    ids::TypedId,
};

/// Order Id
pub type OrderId = TypedId<OrderRecord>;

/// Order Record
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: OrderId,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub total_amount: u64,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order item row joined with its book title.
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub order_id: OrderId,
    pub book_id: BookId,
    pub title: String,
    pub quantity: u32,
    pub price: u64,
}

impl OrderItemRecord {
    #[must_use]
    pub fn into_item(self) -> OrderItem {
        OrderItem {
            book_id: self.book_id,
            title: self.title,
            quantity: self.quantity,
            price: self.price,
        }
    }
}
