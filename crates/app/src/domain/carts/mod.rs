//! Carts

pub mod errors;
pub(crate) mod ledger;
pub mod models;
pub mod records;
mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
