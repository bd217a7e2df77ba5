//! Cart Ledger
//!
//! Every mutation runs against a [`CartStore`] scoped to one transaction: the book is
//! locked first, then the cart row, the new line set and total are computed in memory,
//! and both are written back before the caller commits.

use async_trait::async_trait;
use jiff::Timestamp;

use crate::domain::{
    Entity,
    books::records::{BookId, BookRecord},
    carts::{
        errors::CartsServiceError,
        models::{Cart, CartItem, MAX_QUANTITY, SessionId},
        records::CartId,
    },
};

/// A cart row held under lock for the rest of the transaction.
#[derive(Debug, Clone)]
pub(crate) struct LockedCart {
    pub(crate) id: CartId,
    pub(crate) cart: Cart,
}

/// Storage primitives the ledger is written against.
#[async_trait]
pub(crate) trait CartStore: Send {
    /// Resolve a book, keeping it from being deleted until the transaction ends.
    async fn find_book_by_id(&mut self, book: BookId) -> Result<Option<BookRecord>, sqlx::Error>;

    /// Locking read of a session's cart and its lines.
    async fn get_cart_by_session(
        &mut self,
        session: &SessionId,
    ) -> Result<Option<LockedCart>, sqlx::Error>;

    /// Create the session's cart if needed, and lock it either way.
    async fn upsert_cart(&mut self, session: &SessionId) -> Result<LockedCart, sqlx::Error>;

    /// Persist a recomputed total, returning the new `updated_at`.
    async fn save_cart_total(&mut self, cart: CartId, total: u64)
    -> Result<Timestamp, sqlx::Error>;

    /// Insert a line, or overwrite the quantity of the existing line for the same book.
    async fn upsert_cart_item(&mut self, cart: CartId, item: &CartItem)
    -> Result<(), sqlx::Error>;

    async fn delete_cart_item(&mut self, cart: CartId, book: BookId) -> Result<u64, sqlx::Error>;

    async fn delete_all_cart_items(&mut self, cart: CartId) -> Result<u64, sqlx::Error>;
}

pub(crate) async fn get_cart<S: CartStore>(
    store: &mut S,
    session: &SessionId,
) -> Result<Cart, CartsServiceError> {
    let cart = store
        .get_cart_by_session(session)
        .await?
        .map_or_else(|| Cart::empty(session.clone()), |locked| locked.cart);

    Ok(cart)
}

pub(crate) async fn add_item<S: CartStore>(
    store: &mut S,
    session: &SessionId,
    book: BookId,
    quantity: i64,
) -> Result<Cart, CartsServiceError> {
    let quantity = quantity_from(quantity)?;

    if quantity == 0 {
        return Err(CartsServiceError::invalid("quantity", "must be at least 1"));
    }

    let book = store
        .find_book_by_id(book)
        .await?
        .ok_or_else(|| CartsServiceError::not_found(Entity::Book, book))?;

    let LockedCart { id, mut cart } = store.upsert_cart(session).await?;

    cart.add(&book, quantity)?;

    write_line(store, id, &cart, book.id).await?;

    save_total(store, id, cart).await
}

pub(crate) async fn update_item_quantity<S: CartStore>(
    store: &mut S,
    session: &SessionId,
    book: BookId,
    quantity: i64,
) -> Result<Cart, CartsServiceError> {
    let quantity = quantity_from(quantity)?;

    let LockedCart { id, mut cart } = locked_cart(store, session).await?;

    cart.set_quantity(book, quantity)?;

    if quantity == 0 {
        store.delete_cart_item(id, book).await?;
    } else {
        write_line(store, id, &cart, book).await?;
    }

    save_total(store, id, cart).await
}

pub(crate) async fn remove_item<S: CartStore>(
    store: &mut S,
    session: &SessionId,
    book: BookId,
) -> Result<Cart, CartsServiceError> {
    let LockedCart { id, mut cart } = locked_cart(store, session).await?;

    cart.remove(book)?;

    store.delete_cart_item(id, book).await?;

    save_total(store, id, cart).await
}

pub(crate) async fn clear_cart<S: CartStore>(
    store: &mut S,
    session: &SessionId,
) -> Result<Cart, CartsServiceError> {
    let Some(LockedCart { id, mut cart }) = store.get_cart_by_session(session).await? else {
        return Ok(Cart::empty(session.clone()));
    };

    store.delete_all_cart_items(id).await?;

    cart.clear();

    save_total(store, id, cart).await
}

/// Convert a requested quantity; negative or oversized values are rejected.
fn quantity_from(quantity: i64) -> Result<u32, CartsServiceError> {
    if quantity < 0 {
        return Err(CartsServiceError::invalid("quantity", "must not be negative"));
    }

    u32::try_from(quantity)
        .ok()
        .filter(|quantity| *quantity <= MAX_QUANTITY)
        .ok_or_else(|| CartsServiceError::invalid("quantity", "is too large"))
}

async fn locked_cart<S: CartStore>(
    store: &mut S,
    session: &SessionId,
) -> Result<LockedCart, CartsServiceError> {
    store
        .get_cart_by_session(session)
        .await?
        .ok_or_else(|| CartsServiceError::not_found(Entity::Cart, session))
}

async fn write_line<S: CartStore>(
    store: &mut S,
    id: CartId,
    cart: &Cart,
    book: BookId,
) -> Result<(), CartsServiceError> {
    let item = cart
        .item(book)
        .ok_or_else(|| CartsServiceError::not_found(Entity::CartItem, book))?;

    store.upsert_cart_item(id, item).await?;

    Ok(())
}

async fn save_total<S: CartStore>(
    store: &mut S,
    id: CartId,
    mut cart: Cart,
) -> Result<Cart, CartsServiceError> {
    cart.updated_at = store.save_cart_total(id, cart.total).await?;

    Ok(cart)
}
