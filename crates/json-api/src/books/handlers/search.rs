//! Search Books Handler

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

/// Search Books Handler
///
/// Matches `?query=` against title, author, publisher and category.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Reply<Vec<BookResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let query = req.query::<String>("query").unwrap_or_default();

    let books = state
        .app
        .books
        .search_books(&query)
        .await
        .map_err(into_api_error)?;

    Ok(Reply::list(book_list(books)))
}
