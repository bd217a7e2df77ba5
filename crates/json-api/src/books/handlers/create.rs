//! Create Book Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use crate::{
    books::{
        errors::into_api_error,
        models::{BookResponse, CreateBookRequest},
    },
    envelope::{ApiError, Reply},
    extensions::*,
    state::State,
};

/// Create Book Handler
#[handler]
#[tracing::instrument(
    name = "books.create",
    skip(req, depot, res),
    fields(book_id = tracing::field::Empty, price = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Reply<BookResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request: CreateBookRequest = req.json_body().await?;

    tracing::Span::current().record("price", request.price);

    let book = state
        .app
        .books
        .create_book(request.into())
        .await
        .map_err(into_api_error)?;

    tracing::Span::current().record("book_id", book.id.into_i64());

    res.add_header(LOCATION, format!("/api/shop/books/{}", book.id), true)
        .or_500("failed to set location header")?;

    tracing::info!(book_id = %book.id, "created book");

    Ok(Reply::created(book.into()).message("Book added successfully"))
}
