//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    cart::{errors::into_api_error, handlers::session_param, models::CartResponse},
    envelope::{ApiError, Reply},
    extensions::*,
    state::State,
};

#[handler]
#[tracing::instrument(name = "cart.clear", skip(req, depot), err)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Reply<CartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = session_param(req)?;

    let cart = state
        .app
        .carts
        .clear_cart(&session)
        .await
        .map_err(into_api_error)?;

    Ok(Reply::ok(cart.into()).message("Cart cleared successfully"))
}
