//! Delete Book Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    books::errors::into_api_error,
    envelope::{ApiError, Reply},
    extensions::*,
    state::State,
};

/// Delete Book Handler
///
/// Also drops the book from every cart. Books already ordered cannot be deleted.
#[handler]
#[tracing::instrument(name = "books.delete", skip(req, depot), err)]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Result<Reply<()>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let book = req.id_param("id")?;

    state
        .app
        .books
        .delete_book(book)
        .await
        .map_err(into_api_error)?;

    tracing::info!(book_id = %book, "deleted book");

    Ok(Reply::done("Book deleted successfully"))
}
