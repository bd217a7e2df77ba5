//! Order Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rustc_hash::FxHashMap;

use crate::domain::{
    books::records::BookId,
    carts::models::MAX_QUANTITY,
    orders::{errors::OrdersServiceError, records::OrderId},
};

/// Order lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrdersServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| {
                OrdersServiceError::invalid(
                    "status",
                    format!(
                        "must be one of {}",
                        Self::ALL.map(Self::as_str).join(", ")
                    ),
                )
            })
    }
}

/// Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub items: Vec<OrderItem>,
    pub total_amount: u64,
    pub display_total: String,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// OrderItem Model
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub book_id: BookId,
    pub title: String,
    pub quantity: u32,

    /// Unit price at purchase time.
    pub price: u64,
}

/// New Order Model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewOrder {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub items: Vec<NewOrderItem>,
}

/// NewOrderItem Model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub book_id: BookId,
    pub quantity: i64,
}

impl NewOrder {
    /// Validated lines in request order, with repeated books merged.
    pub(crate) fn lines(&self) -> Result<Vec<(BookId, u32)>, OrdersServiceError> {
        if self.items.is_empty() {
            return Err(OrdersServiceError::invalid(
                "items",
                "an order needs at least one item",
            ));
        }

        let mut lines: Vec<(BookId, u32)> = Vec::with_capacity(self.items.len());
        let mut positions: FxHashMap<BookId, usize> = FxHashMap::default();

        for item in &self.items {
            let quantity = u32::try_from(item.quantity)
                .ok()
                .filter(|quantity| (1..=MAX_QUANTITY).contains(quantity))
                .ok_or_else(|| {
                    OrdersServiceError::invalid(
                        "quantity",
                        format!("must be between 1 and {MAX_QUANTITY}"),
                    )
                })?;

            match positions
                .get(&item.book_id)
                .and_then(|&position| lines.get_mut(position))
            {
                Some((_, merged)) => {
                    *merged = merged
                        .checked_add(quantity)
                        .filter(|quantity| *quantity <= MAX_QUANTITY)
                        .ok_or_else(|| {
                            OrdersServiceError::invalid("quantity", "line quantity is too large")
                        })?;
                }
                None => {
                    positions.insert(item.book_id, lines.len());
                    lines.push((item.book_id, quantity));
                }
            }
        }

        Ok(lines)
    }

    pub(crate) fn customer_name(&self) -> Option<&str> {
        non_blank(self.customer_name.as_deref())
    }

    pub(crate) fn customer_email(&self) -> Option<&str> {
        non_blank(self.customer_email.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
