//! Order request and response bodies.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use bookstore_app::domain::{
    books::records::BookId,
    orders::models::{NewOrder, NewOrderItem, Order, OrderItem},
};

/// Order Response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub id: i64,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub total_amount: u64,
    pub display_total: String,
    pub status: &'static str,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub book_id: i64,
    pub title: String,
    pub quantity: u32,

    /// Unit price at purchase time.
    pub price: u64,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id.into_i64(),
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            total_amount: order.total_amount,
            display_total: order.display_total,
            status: order.status.as_str(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            book_id: item.book_id.into_i64(),
            title: item.title,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

/// Create Order Request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    #[serde(default)]
    pub items: Vec<CreateOrderItemRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderItemRequest {
    pub book_id: i64,
    pub quantity: i64,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            items: request
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    book_id: BookId::from_i64(item.book_id),
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// Update Order Status Request
#[derive(Debug, Deserialize)]
pub(crate) struct UpdateOrderStatusRequest {
    pub status: String,
}
