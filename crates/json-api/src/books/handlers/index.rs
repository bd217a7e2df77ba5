//! List Books Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    books::{
        errors::into_api_error,
        models::{BookResponse, book_list},
    },
    envelope::{ApiError, Reply},
    extensions::*,
    state::State,
};

/// List Books Handler
///
/// Returns the whole catalog, newest first.
#[handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Reply<Vec<BookResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let books = state.app.books.list_books().await.map_err(into_api_error)?;

    Ok(Reply::list(book_list(books)).message("Books retrieved successfully"))
}
