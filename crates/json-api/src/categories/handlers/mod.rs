//! Category Handlers

pub(crate) mod books;
pub(crate) mod index;
