//! Get Order Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, Reply},
    extensions::*,
    orders::{errors::into_api_error, models::OrderResponse},
    state::State,
};

/// Get Order Handler
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Reply<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = req.id_param("id")?;

    let order = state
        .app
        .orders
        .get_order(order)
        .await
        .map_err(into_api_error)?;

    Ok(Reply::ok(order.into()))
}
