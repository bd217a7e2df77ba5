//! Cart Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;

use crate::domain::{
    Entity,
    books::records::{BookId, BookRecord},
    carts::errors::CartsServiceError,
};

/// Largest quantity a single line can hold (`INTEGER` column).
pub const MAX_QUANTITY: u32 = i32::MAX.unsigned_abs();

const MAX_SESSION_ID_LEN: usize = 128;

/// Opaque client-generated token identifying one cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Accepts 1 to 128 characters with no whitespace or control characters.
    ///
    /// # Errors
    ///
    /// Returns [`CartsServiceError::InvalidArgument`] for any other input.
    pub fn parse(value: &str) -> Result<Self, CartsServiceError> {
        let length = value.chars().count();

        if length == 0 || length > MAX_SESSION_ID_LEN {
            return Err(CartsServiceError::invalid(
                "sessionId",
                format!("must be 1 to {MAX_SESSION_ID_LEN} characters"),
            ));
        }

        if value
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(CartsServiceError::invalid(
                "sessionId",
                "may not contain whitespace or control characters",
            ));
        }

        Ok(Self(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Book details shown alongside a cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct CartBook {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub image_url: Option<String>,
}

/// CartItem Model
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub book: CartBook,
    pub quantity: u32,

    /// Book price captured when the line was first created.
    pub price_at_addition: u64,
}

impl CartItem {
    fn snapshot(book: &BookRecord, quantity: u32) -> Self {
        Self {
            book: CartBook {
                id: book.id,
                title: book.title.clone(),
                author: book.author.clone(),
                publisher: book.publisher.clone(),
                image_url: book.image_url.clone(),
            },
            quantity,
            price_at_addition: book.price,
        }
    }

    fn subtotal(&self) -> Option<u64> {
        self.price_at_addition.checked_mul(u64::from(self.quantity))
    }
}

/// Cart Model
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub session_id: SessionId,
    pub items: Vec<CartItem>,

    /// Sum of `price_at_addition * quantity` over every line.
    pub total: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cart {
    /// The cart reported for a session that has never added anything.
    #[must_use]
    pub fn empty(session_id: SessionId) -> Self {
        let now = Timestamp::now();

        Self {
            session_id,
            items: Vec::new(),
            total: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn item(&self, book: BookId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.book.id == book)
    }

    /// Add `quantity` of `book`, creating the line at the book's current price or
    /// topping up an existing line at its original price.
    pub(crate) fn add(&mut self, book: &BookRecord, quantity: u32) -> Result<(), CartsServiceError> {
        let mut items = self.items.clone();

        match items.iter_mut().find(|item| item.book.id == book.id) {
            Some(item) => {
                item.quantity = item
                    .quantity
                    .checked_add(quantity)
                    .filter(|quantity| *quantity <= MAX_QUANTITY)
                    .ok_or_else(|| {
                        CartsServiceError::invalid("quantity", "line quantity is too large")
                    })?;
            }
            None => items.push(CartItem::snapshot(book, quantity)),
        }

        self.replace_items(items)
    }

    /// Set a line's quantity verbatim; zero removes the line.
    pub(crate) fn set_quantity(
        &mut self,
        book: BookId,
        quantity: u32,
    ) -> Result<(), CartsServiceError> {
        if quantity == 0 {
            return self.remove(book);
        }

        let mut items = self.items.clone();

        let item = items
            .iter_mut()
            .find(|item| item.book.id == book)
            .ok_or_else(|| CartsServiceError::not_found(Entity::CartItem, book))?;

        item.quantity = quantity;

        self.replace_items(items)
    }

    pub(crate) fn remove(&mut self, book: BookId) -> Result<(), CartsServiceError> {
        let position = self
            .items
            .iter()
            .position(|item| item.book.id == book)
            .ok_or_else(|| CartsServiceError::not_found(Entity::CartItem, book))?;

        let mut items = self.items.clone();
        items.remove(position);

        self.replace_items(items)
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.total = 0;
    }

    fn replace_items(&mut self, items: Vec<CartItem>) -> Result<(), CartsServiceError> {
        let total = items
            .iter()
            .try_fold(0_u64, |total, item| total.checked_add(item.subtotal()?))
            .filter(|total| i64::try_from(*total).is_ok())
            .ok_or_else(|| CartsServiceError::invalid("quantity", "cart total is too large"))?;

        self.items = items;
        self.total = total;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64, price: u64) -> BookRecord {
        let now = Timestamp::now();

        BookRecord {
            id: BookId::from_i64(id),
            title: format!("Book {id}"),
            author: "Author".to_string(),
            publisher: "Publisher".to_string(),
            price,
            image_url: None,
            pdf_url: None,
            category: None,
            featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn cart() -> Cart {
        Cart::empty(SessionId("s1".to_string()))
    }

    #[test]
    fn session_ids_accept_opaque_printable_tokens() {
        for value in [
            "abc-DEF_123".to_string(),
            "sess:123".to_string(),
            "user@example.com/tab.2".to_string(),
            "é".repeat(128),
        ] {
            let parsed = SessionId::parse(&value);

            assert_eq!(
                parsed.as_ref().map(SessionId::as_str).ok(),
                Some(value.as_str()),
                "expected {value:?} to be accepted, got {parsed:?}"
            );
        }
    }

    #[test]
    fn session_ids_reject_blank_long_and_control_tokens() {
        for value in [
            String::new(),
            "   ".to_string(),
            "a".repeat(129),
            "a b".to_string(),
            "tab\there".to_string(),
            "nul\0".to_string(),
        ] {
            let result = SessionId::parse(&value);

            assert!(
                matches!(
                    result,
                    Err(CartsServiceError::InvalidArgument { field: "sessionId", .. })
                ),
                "expected InvalidArgument for {value:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn adding_the_same_book_twice_merges_lines() -> Result<(), CartsServiceError> {
        let mut cart = cart();

        cart.add(&book(10, 300), 2)?;
        cart.add(&book(10, 300), 1)?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.total, 900);

        Ok(())
    }

    #[test]
    fn topping_up_keeps_the_original_price() -> Result<(), CartsServiceError> {
        let mut cart = cart();

        cart.add(&book(1, 500), 1)?;
        cart.add(&book(1, 700), 1)?;

        assert_eq!(cart.items[0].price_at_addition, 500);
        assert_eq!(cart.total, 1000);

        Ok(())
    }

    #[test]
    fn setting_quantity_to_zero_removes_the_line() -> Result<(), CartsServiceError> {
        let mut cart = cart();

        cart.add(&book(1, 500), 1)?;
        cart.add(&book(2, 250), 2)?;
        cart.set_quantity(BookId::from_i64(1), 0)?;

        assert!(cart.item(BookId::from_i64(1)).is_none());
        assert_eq!(cart.total, 500);

        Ok(())
    }

    #[test]
    fn removing_a_missing_line_is_not_found() {
        let mut cart = cart();

        let result = cart.remove(BookId::from_i64(7));

        assert!(
            matches!(
                result,
                Err(CartsServiceError::NotFound {
                    entity: Entity::CartItem,
                    ..
                })
            ),
            "expected NotFound, got {result:?}"
        );
    }

    #[test]
    fn overflowing_quantity_leaves_the_cart_unchanged() -> Result<(), CartsServiceError> {
        let mut cart = cart();

        cart.add(&book(1, 1), MAX_QUANTITY)?;
        let before = cart.clone();

        let result = cart.add(&book(1, 1), 1);

        assert!(
            matches!(result, Err(CartsServiceError::InvalidArgument { .. })),
            "expected InvalidArgument, got {result:?}"
        );
        assert_eq!(cart, before);

        Ok(())
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let mut cart = cart();

        let result = cart.add(&book(1, u64::MAX / 2), 3);

        assert!(
            matches!(result, Err(CartsServiceError::InvalidArgument { .. })),
            "expected InvalidArgument, got {result:?}"
        );
        assert!(cart.items.is_empty());
    }
}
