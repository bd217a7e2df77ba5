//! Update Order Status Handler

use std::sync::Arc;

use salvo::prelude::*;

use bookstore_app::domain::orders::models::OrderStatus;

use crate::{
    envelope::{ApiError, Reply},
    extensions::*,
    orders::{
        errors::into_api_error,
        models::{OrderResponse, UpdateOrderStatusRequest},
    },
    state::State,
};

/// Update Order Status Handler
///
/// Unknown status values are rejected before anything is written.
#[handler]
#[tracing::instrument(
    name = "orders.update_status",
    skip(req, depot),
    fields(order_id = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Reply<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = req.id_param("id")?;
    let request: UpdateOrderStatusRequest = req.json_body().await?;

    let status = request
        .status
        .parse::<OrderStatus>()
        .map_err(into_api_error)?;

    let span = tracing::Span::current();

    span.record("order_id", tracing::field::display(order));
    span.record("status", status.as_str());

    let order = state
        .app
        .orders
        .update_status(order, status)
        .await
        .map_err(into_api_error)?;

    tracing::info!(order_id = %order.id, status = %order.status, "updated order status");

    Ok(Reply::ok(order.into()).message("Order status updated successfully"))
}
