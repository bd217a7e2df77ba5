//! Create Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use crate::{
    envelope::{ApiError, Reply},
    extensions::*,
    orders::{
        errors::into_api_error,
        models::{CreateOrderRequest, OrderResponse},
    },
    state::State,
};

/// Create Order Handler
///
/// Prices every line from the catalog; a single unknown book fails the whole order.
#[handler]
#[tracing::instrument(
    name = "orders.create",
    skip(req, depot, res),
    fields(items_count = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Reply<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request: CreateOrderRequest = req.json_body().await?;

    tracing::Span::current().record("items_count", request.items.len());

    let order = state
        .app
        .orders
        .create_order(request.into())
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/api/shop/orders/{}", order.id), true)
        .or_500("failed to set location header")?;

    Ok(Reply::created(order.into()).message("Order placed successfully"))
}
