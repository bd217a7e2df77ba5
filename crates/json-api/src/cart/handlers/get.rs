//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    cart::{errors::into_api_error, handlers::session_param, models::CartResponse},
    envelope::{ApiError, Reply},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Sessions without a cart read as an empty cart.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Reply<CartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = session_param(req)?;

    let cart = state
        .app
        .carts
        .get_cart(&session)
        .await
        .map_err(into_api_error)?;

    Ok(Reply::ok(cart.into()).message("Cart retrieved successfully"))
}
