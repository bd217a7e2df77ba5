//! Update Cart Item Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    cart::{
        errors::into_api_error,
        handlers::session_param,
        models::{CartResponse, UpdateCartItemRequest},
    },
    envelope::{ApiError, Reply},
    extensions::*,
    state::State,
};

/// Update Cart Item Handler
///
/// Sets the line quantity verbatim. `0` removes the line; negatives are rejected.
#[handler]
#[tracing::instrument(name = "cart.update", skip(req, depot), err)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Reply<CartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = session_param(req)?;
    let book = req.id_param("book")?;
    let request: UpdateCartItemRequest = req.json_body().await?;

    let cart = state
        .app
        .carts
        .update_item_quantity(&session, book, request.quantity)
        .await
        .map_err(into_api_error)?;

    Ok(Reply::ok(cart.into()).message("Cart updated successfully"))
}
