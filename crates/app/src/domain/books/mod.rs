//! Books

pub mod errors;
pub mod models;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::BooksServiceError;
pub use service::*;
