//! List Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, Reply},
    extensions::*,
    orders::{errors::into_api_error, models::OrderResponse},
    state::State,
};

/// List Orders Handler
///
/// Every order with its items, newest first.
#[handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Reply<Vec<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_orders()
        .await
        .map_err(into_api_error)?;

    Ok(
        Reply::list(orders.into_iter().map(OrderResponse::from).collect())
            .message("Orders retrieved successfully"),
    )
}
